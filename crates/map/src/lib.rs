//! Map rendering - projects entities onto a surface and animates the active one.
//!
//! - [`projection`]: reference-image pixels to surface units
//! - [`animation`]: pulse radius, opacity, ripple and glow
//! - [`surface`]: the [`Surface`] trait and a recording [`DrawList`]
//! - [`renderer`]: [`MapRenderer`], the frame task and marker drawing

pub mod animation;
pub mod projection;
pub mod renderer;
pub mod surface;

pub use geoquiz_core as core;
pub use geoquiz_core::engine;
pub use geoquiz_core::types;

pub use animation::PulseAnimation;
pub use projection::{Point, Projection, SurfaceSize};
pub use renderer::MapRenderer;
pub use surface::{DrawList, DrawOp, Rgba, Surface};
