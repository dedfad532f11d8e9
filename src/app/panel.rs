//! Panel state for twinpane.
//!
//! A panel is one of the two directory views: its directory, the listed entries,
//! the cursor and scroll offset, the set of selected names and the hidden-file toggle.
//! Only the dispatcher mutates it.

use crate::core::{FileEntry, list_entries};

use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Identifies one of the two panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    Left,
    Right,
}

impl PanelId {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            PanelId::Left => 0,
            PanelId::Right => 1,
        }
    }

    #[inline]
    pub fn other(self) -> Self {
        match self {
            PanelId::Left => PanelId::Right,
            PanelId::Right => PanelId::Left,
        }
    }
}

/// Holds the directory, listing, cursor and selection of a panel.
///
/// Invariants kept by every method:
/// - `cursor < entries.len()`, or `cursor == 0` for an empty listing
/// - `scroll <= cursor`
/// - every selected name is part of `entries`; a refresh clears the selection
#[derive(Debug)]
pub struct PanelState {
    dir: PathBuf,
    entries: Vec<FileEntry>,
    cursor: usize,
    scroll: usize,
    selected: HashSet<OsString>,
    show_hidden: bool,
    dirs_first: bool,
}

impl PanelState {
    pub fn new(dir: PathBuf, show_hidden: bool, dirs_first: bool) -> Self {
        let mut panel = Self {
            dir,
            entries: Vec::new(),
            cursor: 0,
            scroll: 0,
            selected: HashSet::new(),
            show_hidden,
            dirs_first,
        };
        panel.reload();
        panel
    }

    // Getters / Accessors

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[inline]
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    #[inline]
    pub fn selected(&self) -> &HashSet<OsString> {
        &self.selected
    }

    #[inline]
    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    #[inline]
    pub fn is_selected(&self, name: &OsStr) -> bool {
        self.selected.contains(name)
    }

    /// The entry under the cursor, sentinel entries included.
    pub fn highlighted(&self) -> Option<&FileEntry> {
        self.entries.get(self.cursor)
    }

    /// Absolute path of the entry under the cursor. Never a sentinel.
    pub fn highlighted_path(&self) -> Option<PathBuf> {
        self.highlighted()
            .filter(|e| !e.is_error())
            .map(|e| self.dir.join(e.name()))
    }

    // Listing

    /// Re-reads the directory. Resets cursor and scroll and clears the selection.
    pub fn reload(&mut self) {
        self.entries = list_entries(&self.dir, self.show_hidden, self.dirs_first);
        self.cursor = 0;
        self.scroll = 0;
        self.selected.clear();
    }

    /// Switches to `dir` and lists it.
    pub fn set_dir(&mut self, dir: PathBuf) {
        self.dir = dir;
        self.reload();
    }

    /// Moves to the parent directory. Returns `false` at the filesystem root.
    pub fn go_parent(&mut self) -> bool {
        match self.dir.parent() {
            Some(parent) => {
                let parent = parent.to_path_buf();
                self.set_dir(parent);
                true
            }
            None => false,
        }
    }

    /// Descends into the highlighted entry when it is a directory.
    /// Returns `false` (and leaves the panel alone) otherwise.
    pub fn enter_highlighted(&mut self) -> bool {
        match self.highlighted() {
            Some(entry) if entry.is_dir() && !entry.is_error() => {
                let target = self.dir.join(entry.name());
                self.set_dir(target);
                true
            }
            _ => false,
        }
    }

    pub fn toggle_hidden(&mut self) {
        self.show_hidden = !self.show_hidden;
        self.reload();
    }

    /// Whether a change at `changed` may alter this panel's listing,
    /// i.e. the panel shows `changed` itself or one of its ancestors.
    pub fn is_affected_by(&self, changed: &Path) -> bool {
        changed.starts_with(&self.dir)
    }

    // Cursor

    /// Moves the cursor up by one entry. No wrap-around.
    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        }
    }

    /// Moves the cursor down by one entry, scrolling so that it stays within
    /// `visible_rows` rows. No wrap-around.
    pub fn move_down(&mut self, visible_rows: usize) {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
        }
        self.clamp_scroll(visible_rows);
    }

    /// Keeps the cursor inside the visible window after a height change.
    pub fn clamp_scroll(&mut self, visible_rows: usize) {
        let rows = visible_rows.max(1);
        if self.cursor >= self.scroll + rows {
            self.scroll = self.cursor + 1 - rows;
        }
        if self.scroll > self.cursor {
            self.scroll = self.cursor;
        }
    }

    // Selection

    /// Toggles membership of the highlighted entry. Sentinel entries are ignored.
    pub fn toggle_selection(&mut self) {
        let Some(entry) = self.highlighted().filter(|e| !e.is_error()) else {
            return;
        };
        let name = entry.name().to_os_string();
        if !self.selected.remove(&name) {
            self.selected.insert(name);
        }
    }

    #[inline]
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Absolute paths an action operates on: the selection in listing order,
    /// or the highlighted entry when nothing is selected.
    pub fn action_targets(&self) -> Vec<PathBuf> {
        if self.selected.is_empty() {
            return self.highlighted_path().into_iter().collect();
        }
        self.entries
            .iter()
            .filter(|e| !e.is_error() && self.selected.contains(e.name()))
            .map(|e| self.dir.join(e.name()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::error;
    use std::fs;
    use tempfile::tempdir;

    fn panel_with(names: &[&str]) -> Result<(tempfile::TempDir, PanelState), Box<dyn error::Error>> {
        let dir = tempdir()?;
        for name in names {
            fs::write(dir.path().join(name), name)?;
        }
        let panel = PanelState::new(dir.path().to_path_buf(), false, false);
        Ok((dir, panel))
    }

    #[test]
    fn test_cursor_moves_without_wrapping() -> Result<(), Box<dyn error::Error>> {
        let (_dir, mut panel) = panel_with(&["a", "b", "c"])?;

        panel.move_up();
        assert_eq!(panel.cursor(), 0);

        for _ in 0..5 {
            panel.move_down(10);
        }
        assert_eq!(panel.cursor(), 2);
        assert_eq!(panel.scroll(), 0);
        Ok(())
    }

    #[test]
    fn test_scroll_follows_cursor() -> Result<(), Box<dyn error::Error>> {
        let (_dir, mut panel) = panel_with(&["a", "b", "c", "d", "e"])?;

        for _ in 0..4 {
            panel.move_down(2);
        }
        assert_eq!(panel.cursor(), 4);
        assert_eq!(panel.scroll(), 3);

        for _ in 0..4 {
            panel.move_up();
            assert!(panel.scroll() <= panel.cursor());
        }
        assert_eq!(panel.scroll(), 0);
        Ok(())
    }

    #[test]
    fn test_selection_targets_in_listing_order() -> Result<(), Box<dyn error::Error>> {
        let (dir, mut panel) = panel_with(&["a", "b", "c"])?;

        panel.move_down(10);
        panel.move_down(10);
        panel.toggle_selection();
        panel.move_up();
        panel.move_up();
        panel.toggle_selection();

        let targets = panel.action_targets();
        assert_eq!(targets, vec![dir.path().join("a"), dir.path().join("c")]);

        panel.toggle_selection();
        assert_eq!(panel.selected().len(), 1);
        Ok(())
    }

    #[test]
    fn test_targets_fall_back_to_highlighted() -> Result<(), Box<dyn error::Error>> {
        let (dir, panel) = panel_with(&["only.txt"])?;
        assert_eq!(panel.action_targets(), vec![dir.path().join("only.txt")]);
        Ok(())
    }

    #[test]
    fn test_reload_clears_selection_and_cursor() -> Result<(), Box<dyn error::Error>> {
        let (_dir, mut panel) = panel_with(&["a", "b"])?;
        panel.move_down(10);
        panel.toggle_selection();

        panel.reload();
        assert_eq!(panel.cursor(), 0);
        assert_eq!(panel.scroll(), 0);
        assert!(panel.selected().is_empty());
        Ok(())
    }

    #[test]
    fn test_hidden_toggle_relists() -> Result<(), Box<dyn error::Error>> {
        let (_dir, mut panel) = panel_with(&[".dot", "plain"])?;
        assert_eq!(panel.entries().len(), 1);

        panel.toggle_hidden();
        assert!(panel.show_hidden());
        assert_eq!(panel.entries().len(), 2);
        Ok(())
    }

    #[test]
    fn test_enter_and_parent() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("sub"))?;
        fs::write(dir.path().join("sub/inner.txt"), "x")?;
        let mut panel = PanelState::new(dir.path().to_path_buf(), false, false);

        assert!(panel.enter_highlighted());
        assert_eq!(panel.dir(), dir.path().join("sub"));
        assert!(!panel.enter_highlighted(), "files are not entered");

        assert!(panel.go_parent());
        assert_eq!(panel.dir(), dir.path());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_parent_of_root_is_noop() {
        let mut panel = PanelState::new(PathBuf::from("/"), false, false);
        assert!(!panel.go_parent());
        assert_eq!(panel.dir(), Path::new("/"));
    }

    #[test]
    fn test_sentinel_is_never_a_target() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let mut panel = PanelState::new(dir.path().join("missing"), false, false);
        assert_eq!(panel.entries().len(), 1);
        assert!(panel.entries()[0].is_error());

        panel.toggle_selection();
        assert!(panel.selected().is_empty());
        assert!(panel.action_targets().is_empty());
        assert!(!panel.enter_highlighted());
        Ok(())
    }

    #[test]
    fn test_affected_by_descendant_changes() -> Result<(), Box<dyn error::Error>> {
        let (dir, panel) = panel_with(&[])?;
        assert!(panel.is_affected_by(dir.path()));
        assert!(panel.is_affected_by(&dir.path().join("new.txt")));
        assert!(!panel.is_affected_by(dir.path().parent().unwrap_or(Path::new("/"))));
        Ok(())
    }
}
