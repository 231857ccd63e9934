//! Terminal input module (session-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::QuizAction`] and provides the answer-field
//! editor.

pub mod handler;
pub mod map;

pub use geoquiz_types as types;

pub use handler::LineEditor;
pub use map::{handle_key_event, should_quit};
