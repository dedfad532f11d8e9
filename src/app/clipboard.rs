//! Clipboard for twinpane.
//!
//! Holds the pending source paths of a copy or move until they are pasted or cleared.

use std::path::PathBuf;

/// What a paste does with the clipboard sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operation {
    #[default]
    None,
    Copy,
    Move,
}

/// Ordered absolute source paths plus the pending operation.
///
/// Non-empty `sources` always come with an operation other than [Operation::None].
#[derive(Debug, Default)]
pub struct Clipboard {
    sources: Vec<PathBuf>,
    operation: Operation,
}

impl Clipboard {
    #[inline]
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    #[inline]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Replaces the clipboard contents. Returns `false` and leaves the clipboard
    /// untouched when there is nothing to hold or no operation.
    pub fn fill(&mut self, sources: Vec<PathBuf>, operation: Operation) -> bool {
        if sources.is_empty() || operation == Operation::None {
            return false;
        }
        self.sources = sources;
        self.operation = operation;
        true
    }

    /// Empties the clipboard, handing back the sources and the operation.
    pub fn take(&mut self) -> (Vec<PathBuf>, Operation) {
        let operation = std::mem::take(&mut self.operation);
        (std::mem::take(&mut self.sources), operation)
    }

    pub fn clear(&mut self) {
        self.sources.clear();
        self.operation = Operation::None;
    }
}
