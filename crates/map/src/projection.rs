//! Coordinate mapping from reference-image pixels to surface space.
//!
//! Each axis is scaled on its own (`surface / reference`), so a surface with a
//! different aspect ratio than the reference image stretches the map instead
//! of letterboxing it.

use crate::types::{MapPosition, ReferenceDimensions};

/// A point in surface space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size of a render surface, read at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Per-axis scale from reference pixels to surface units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Projection {
    pub fn new(reference: ReferenceDimensions, surface: SurfaceSize) -> Self {
        Self {
            scale_x: surface.width / reference.width,
            scale_y: surface.height / reference.height,
        }
    }

    pub fn project(&self, x: f64, y: f64) -> Point {
        Point::new(x * self.scale_x, y * self.scale_y)
    }

    /// `None` for off-map positions.
    pub fn project_position(&self, position: MapPosition) -> Option<Point> {
        position.point().map(|(x, y)| self.project(x, y))
    }
}
