//! Key mapping from terminal events to quiz actions.
//!
//! Printable characters are not actions: they belong to the answer field and
//! are handled by [`crate::LineEditor`].

use crate::types::QuizAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to quiz actions.
pub fn handle_key_event(key: KeyEvent) -> Option<QuizAction> {
    match key.code {
        KeyCode::Enter => Some(QuizAction::Submit),

        KeyCode::F(2) => Some(QuizAction::RequestHint),
        KeyCode::F(3) => Some(QuizAction::Skip),
        KeyCode::F(4) => Some(QuizAction::ToggleLanguage),

        // Multiple-choice options
        KeyCode::F(n @ 5..=7) => Some(QuizAction::PickChoice(n - 5)),

        KeyCode::Esc => Some(QuizAction::DismissCelebration),

        _ => None,
    }
}

/// Check if key should quit the quiz.
///
/// Esc closes a running celebration first and only quits otherwise.
pub fn should_quit(key: KeyEvent, celebrating: bool) -> bool {
    (key.code == KeyCode::Esc && !celebrating)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
