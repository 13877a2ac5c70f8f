//! Single-line text field with a char-indexed cursor.
//!
//! Supports the subset of editing operations the showcase needs. Every
//! operation reports whether the text changed so the caller can decide
//! whether to notify the debounce gate.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Default)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

/// Outcome of feeding a key to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The text changed.
    Changed,
    /// Only the cursor moved.
    Moved,
    /// The key is not an editing key.
    Ignored,
}

impl TextInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Inserts `text` at the cursor. Newlines are flattened to spaces.
    pub fn insert_str(&mut self, text: &str) -> bool {
        let flat: String = text
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .filter(|c| !c.is_control())
            .collect();
        if flat.is_empty() {
            return false;
        }
        let at = char_to_byte_index(&self.text, self.cursor);
        self.text.insert_str(at, &flat);
        self.cursor += flat.chars().count();
        true
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = char_to_byte_index(&self.text, self.cursor - 1);
        let end = char_to_byte_index(&self.text, self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor -= 1;
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let start = char_to_byte_index(&self.text, self.cursor);
        let end = char_to_byte_index(&self.text, self.cursor + 1);
        self.text.replace_range(start..end, "");
        true
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.text.is_empty();
        self.text.clear();
        self.cursor = 0;
        changed
    }

    /// Applies an editing key.
    pub fn input(&mut self, key: KeyEvent) -> EditOutcome {
        let changed = |c: bool| {
            if c {
                EditOutcome::Changed
            } else {
                EditOutcome::Moved
            }
        };
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => changed(self.clear()),
            KeyCode::Char('a') if ctrl => {
                self.cursor = 0;
                EditOutcome::Moved
            }
            KeyCode::Char('e') if ctrl => {
                self.cursor = self.char_len();
                EditOutcome::Moved
            }
            KeyCode::Char(_) if ctrl => EditOutcome::Ignored,
            KeyCode::Char(c) => {
                let mut buf = [0u8; 4];
                changed(self.insert_str(c.encode_utf8(&mut buf)))
            }
            KeyCode::Backspace => changed(self.backspace()),
            KeyCode::Delete => changed(self.delete()),
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                EditOutcome::Moved
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                EditOutcome::Moved
            }
            KeyCode::Home => {
                self.cursor = 0;
                EditOutcome::Moved
            }
            KeyCode::End => {
                self.cursor = self.char_len();
                EditOutcome::Moved
            }
            _ => EditOutcome::Ignored,
        }
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

fn char_to_byte_index(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(idx, _)| idx)
}
