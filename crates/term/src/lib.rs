//! Terminal quiz renderer module.
//!
//! A small rendering layer for the terminal quiz. It avoids ratatui widgets
//! and layout and instead renders into a simple framebuffer that is diffed
//! and flushed to the terminal.
//!
//! - [`canvas`]: half-block pixel surface the map renderer draws on
//! - [`quiz_view`]: snapshot + canvas → framebuffer
//! - [`renderer`]: framebuffer → terminal escapes
//! - [`render_throttle`]: skips redundant frames while nothing animates

pub mod canvas;
pub mod fb;
pub mod labels;
pub mod quiz_view;
pub mod render_throttle;
pub mod renderer;

pub use geoquiz_core as core;
pub use geoquiz_map as map;
pub use geoquiz_types as types;

pub use canvas::{Backdrop, MapCanvas};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use labels::Labels;
pub use quiz_view::{QuizView, Viewport};
pub use render_throttle::{snapshot_fingerprint, RenderThrottle};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
