//! Drawing surface abstraction.
//!
//! The map renderer only ever draws circles, so that is all a surface has to
//! support. The terminal crate implements it on a half-block pixel canvas;
//! [`DrawList`] records calls for tests and benchmarks.

use crate::projection::{Point, SurfaceSize};

/// RGB color with a straight alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Blend `self` over `base`.
    pub fn over(self, base: (u8, u8, u8)) -> (u8, u8, u8) {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |top: u8, bottom: u8| -> u8 {
            (top as f64 * a + bottom as f64 * (1.0 - a)).round() as u8
        };
        (mix(self.r, base.0), mix(self.g, base.1), mix(self.b, base.2))
    }
}

pub const HIGHLIGHT: Rgba = Rgba::rgb(16, 185, 129);
pub const MARKER: Rgba = Rgba::rgb(59, 130, 246);
pub const OUTLINE: Rgba = Rgba::rgb(255, 255, 255);

pub trait Surface {
    fn size(&self) -> SurfaceSize;

    /// Multiplier applied to marker radii and line widths. Coarse surfaces
    /// (terminal cells) shrink markers so they stay readable.
    fn marker_scale(&self) -> f64 {
        1.0
    }

    /// Reset to the background (the reference image, or a plain fill).
    fn clear(&mut self);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);

    fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, color: Rgba);

    /// Soft halo of `blur` units around a disc of `radius`.
    fn glow(&mut self, center: Point, radius: f64, blur: f64, color: Rgba) {
        self.fill_circle(center, radius + blur * 0.5, color.with_alpha(color.a * 0.25));
    }
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Fill {
        center: Point,
        radius: f64,
        color: Rgba,
    },
    Stroke {
        center: Point,
        radius: f64,
        width: f64,
        color: Rgba,
    },
    Glow {
        center: Point,
        radius: f64,
        blur: f64,
        color: Rgba,
    },
}

/// A surface that records draw calls instead of rasterizing them.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    size: SurfaceSize,
    scale: f64,
    ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            scale: 1.0,
            ops: Vec::new(),
        }
    }

    pub fn with_marker_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Number of `Clear` calls, i.e. frames drawn.
    pub fn frames(&self) -> usize {
        self.ops.iter().filter(|op| **op == DrawOp::Clear).count()
    }

    /// Ops since the last `Clear`.
    pub fn last_frame(&self) -> &[DrawOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| *op == DrawOp::Clear)
            .map_or(0, |i| i + 1);
        &self.ops[start..]
    }

    pub fn reset(&mut self) {
        self.ops.clear();
    }
}

impl Surface for DrawList {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn marker_scale(&self) -> f64 {
        self.scale
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.ops.push(DrawOp::Fill {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, color: Rgba) {
        self.ops.push(DrawOp::Stroke {
            center,
            radius,
            width,
            color,
        });
    }

    fn glow(&mut self, center: Point, radius: f64, blur: f64, color: Rgba) {
        self.ops.push(DrawOp::Glow {
            center,
            radius,
            blur,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_blend() {
        let half = Rgba::rgb(255, 0, 0).with_alpha(0.5);
        assert_eq!(half.over((0, 0, 0)), (128, 0, 0));
        assert_eq!(Rgba::rgb(1, 2, 3).over((9, 9, 9)), (1, 2, 3));
        assert_eq!(Rgba::rgb(1, 2, 3).with_alpha(0.0).over((9, 9, 9)), (9, 9, 9));
    }

    #[test]
    fn test_draw_list_last_frame() {
        let mut list = DrawList::new(SurfaceSize::new(10.0, 10.0));
        list.clear();
        list.fill_circle(Point::new(1.0, 1.0), 2.0, MARKER);
        list.clear();
        list.stroke_circle(Point::new(2.0, 2.0), 3.0, 1.0, OUTLINE);
        assert_eq!(list.frames(), 2);
        assert_eq!(list.last_frame().len(), 1);
        assert!(matches!(list.last_frame()[0], DrawOp::Stroke { .. }));
    }
}
