//! Single-line text input for twinpane.
//!
//! [LineEditor] is the editing capability the console prompt and the rename modal
//! rely on; [TextInput] is the stock implementation with a byte-indexed cursor that
//! always rests on a char boundary.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Maximum number of characters a [TextInput] accepts.
pub const CHAR_LIMIT: usize = 256;

/// A single-line text editor driven by key events.
pub trait LineEditor {
    /// Applies a key. Returns `true` if the key was an editing key.
    fn handle_key(&mut self, key: KeyEvent) -> bool;
    fn value(&self) -> &str;
    /// Replaces the content and moves the cursor to its end.
    fn set_value(&mut self, value: &str);
    /// Cursor position as a byte offset into [LineEditor::value].
    fn cursor(&self) -> usize;
}

#[derive(Debug, Default, Clone)]
pub struct TextInput {
    buffer: String,
    cursor: usize,
}

impl TextInput {
    pub fn new(value: &str) -> Self {
        let mut input = Self::default();
        input.set_value(value);
        input
    }

    /// Clears the buffer and returns what it held.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buffer)
    }

    /// Inserts a character at the cursor position.
    fn insert_at_cursor(&mut self, ch: char) {
        if ch.is_control() || self.buffer.chars().count() >= CHAR_LIMIT {
            return;
        }
        self.buffer.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Deletes the character before the cursor and moves the cursor back.
    fn backspace_at_cursor(&mut self) {
        if let Some((previous, _)) = self.buffer[..self.cursor].char_indices().next_back() {
            self.buffer.remove(previous);
            self.cursor = previous;
        }
    }

    /// Deletes the character under the cursor.
    fn delete_at_cursor(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    fn move_cursor_left(&mut self) {
        if let Some((previous, _)) = self.buffer[..self.cursor].char_indices().next_back() {
            self.cursor = previous;
        }
    }

    fn move_cursor_right(&mut self) {
        if let Some(ch) = self.buffer[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }
}

impl LineEditor for TextInput {
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => self.insert_at_cursor(c),
            KeyCode::Backspace => self.backspace_at_cursor(),
            KeyCode::Delete => self.delete_at_cursor(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.buffer.len(),
            _ => return false,
        }
        true
    }

    #[inline]
    fn value(&self) -> &str {
        &self.buffer
    }

    fn set_value(&mut self, value: &str) {
        self.buffer = value.chars().take(CHAR_LIMIT).collect();
        self.cursor = self.buffer.len();
    }

    #[inline]
    fn cursor(&self) -> usize {
        self.cursor
    }
}
