//! Rename modal for twinpane.
//!
//! While a [RenameState] is live it owns key input: the confirm and cancel keys end
//! it, every other key goes to its [LineEditor].

use crate::app::PanelId;
use crate::app::input::{LineEditor, TextInput};

use crossterm::event::KeyEvent;
use std::path::{Path, PathBuf};

/// Outcome of feeding one key to the modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameStep {
    Continue,
    /// Apply the rename to the pending name.
    Confirm(String),
    Cancel,
}

/// The entry being renamed, the panel that owns it and the pending name.
#[derive(Debug)]
pub struct RenameState<E: LineEditor = TextInput> {
    target: PathBuf,
    panel: PanelId,
    editor: E,
}

impl RenameState<TextInput> {
    /// Starts a rename of `target`, seeded with its current base name.
    pub fn new(target: PathBuf, panel: PanelId) -> Self {
        let seed = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::with_editor(target, panel, TextInput::new(&seed))
    }
}

impl<E: LineEditor> RenameState<E> {
    pub fn with_editor(target: PathBuf, panel: PanelId, editor: E) -> Self {
        Self {
            target,
            panel,
            editor,
        }
    }

    #[inline]
    pub fn target(&self) -> &Path {
        &self.target
    }

    #[inline]
    pub fn panel(&self) -> PanelId {
        self.panel
    }

    #[inline]
    pub fn pending_name(&self) -> &str {
        self.editor.value()
    }

    #[inline]
    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Forwards an ordinary key to the editor.
    pub fn edit(&mut self, key: KeyEvent) -> RenameStep {
        self.editor.handle_key(key);
        RenameStep::Continue
    }

    pub fn confirm(&self) -> RenameStep {
        RenameStep::Confirm(self.editor.value().to_string())
    }

    pub fn cancel(&self) -> RenameStep {
        RenameStep::Cancel
    }
}
