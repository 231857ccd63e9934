//! GeoQuiz (workspace facade crate).
//!
//! Re-exports the workspace crates as `geoquiz::{core,data,engine,input,map,term,types}`
//! and holds the binary's glue: configuration, logging setup and the app loop state.

pub use geoquiz_core as core;
pub use geoquiz_data as data;
pub use geoquiz_engine as engine;
pub use geoquiz_input as input;
pub use geoquiz_map as map;
pub use geoquiz_term as term;
pub use geoquiz_types as types;

pub mod app;
pub mod config;
pub mod logging;
