//! Answer field editing.
//!
//! Fixed-capacity line buffer: at most [`MAX_INPUT_LEN`] characters, stored
//! inline so typing never allocates.

use arrayvec::ArrayString;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::MAX_INPUT_LEN;

// Worst case four UTF-8 bytes per character.
const INPUT_BYTES: usize = MAX_INPUT_LEN * 4;

#[derive(Debug, Clone, Default)]
pub struct LineEditor {
    text: ArrayString<INPUT_BYTES>,
    chars: usize,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.chars
    }

    pub fn is_empty(&self) -> bool {
        self.chars == 0
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.chars = 0;
    }

    /// Replace the contents, truncating to capacity.
    pub fn set(&mut self, s: &str) {
        self.clear();
        for c in s.chars() {
            if !self.push(c) {
                break;
            }
        }
    }

    /// Append one character. Returns `false` when full.
    pub fn push(&mut self, c: char) -> bool {
        if self.chars >= MAX_INPUT_LEN || self.text.try_push(c).is_err() {
            return false;
        }
        self.chars += 1;
        true
    }

    pub fn backspace(&mut self) -> bool {
        if self.text.pop().is_some() {
            self.chars -= 1;
            true
        } else {
            false
        }
    }

    /// Apply an editing key. Returns `true` when the text changed.
    ///
    /// Control chords other than Ctrl+U (clear line) are ignored.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => {
                let had_text = !self.is_empty();
                self.clear();
                had_text
            }
            KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => false,
            KeyCode::Char(c) => self.push(c),
            KeyCode::Backspace => self.backspace(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(editor: &mut LineEditor, s: &str) {
        for c in s.chars() {
            editor.handle_key(KeyEvent::from(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut e = LineEditor::new();
        type_str(&mut e, "Berlijn");
        assert_eq!(e.text(), "Berlijn");
        assert!(e.handle_key(KeyEvent::from(KeyCode::Backspace)));
        assert_eq!(e.text(), "Berlij");
        assert_eq!(e.len(), 6);
    }

    #[test]
    fn test_multibyte_characters() {
        let mut e = LineEditor::new();
        type_str(&mut e, "Chișinău");
        assert_eq!(e.len(), 8);
        e.backspace();
        assert_eq!(e.text(), "Chișină");
    }

    #[test]
    fn test_capacity_is_in_characters() {
        let mut e = LineEditor::new();
        e.set(&"é".repeat(MAX_INPUT_LEN + 10));
        assert_eq!(e.len(), MAX_INPUT_LEN);
        assert!(!e.push('x'));
    }

    #[test]
    fn test_control_chords() {
        let mut e = LineEditor::new();
        type_str(&mut e, "Rome");
        assert!(!e.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert_eq!(e.text(), "Rome");
        assert!(e.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)));
        assert!(e.is_empty());
        assert!(!e.handle_key(KeyEvent::from(KeyCode::Backspace)));
    }
}
