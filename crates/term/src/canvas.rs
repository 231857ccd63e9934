//! Half-block pixel canvas.
//!
//! Each terminal cell shows two vertically stacked pixels using `▀` with the
//! upper pixel as foreground and the lower one as background, which gives
//! roughly square pixels on common terminal fonts.
//!
//! An optional [`Backdrop`] (the reference map) is box-sampled to the pixel
//! grid on every resize; `clear` restores it, or the flat background when
//! there is none.

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::map::{Point, Rgba, Surface, SurfaceSize};

/// Width of the surface the marker sizes were designed for.
pub const DESIGN_WIDTH: f64 = 850.0;

/// Markers never shrink below this factor, or they vanish at terminal resolution.
pub const MIN_MARKER_SCALE: f64 = 0.12;

pub const SEA: Rgb = Rgb::new(24, 38, 58);

/// Image painted under the markers, in its own RGBA sample grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backdrop {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 4]>,
}

impl Backdrop {
    /// `None` unless `pixels` holds exactly `width × height` samples.
    pub fn new(width: usize, height: usize, pixels: Vec<[u8; 4]>) -> Option<Self> {
        if width == 0 || height == 0 || pixels.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Average the samples covering each output pixel, composited over `background`.
    fn scale_into(&self, out_w: usize, out_h: usize, background: Rgb, out: &mut Vec<Rgb>) {
        out.clear();
        out.reserve(out_w * out_h);
        for y in 0..out_h {
            let rows = span(y, out_h, self.height);
            for x in 0..out_w {
                let cols = span(x, out_w, self.width);
                let mut sum = [0u32; 3];
                let mut n = 0u32;
                for sy in rows.clone() {
                    let row = &self.pixels[sy * self.width..(sy + 1) * self.width];
                    for &[r, g, b, a] in &row[cols.clone()] {
                        let alpha = a as f64 / 255.0;
                        let (r, g, b) = Rgba { r, g, b, a: alpha }.over(background.tuple());
                        sum[0] += r as u32;
                        sum[1] += g as u32;
                        sum[2] += b as u32;
                        n += 1;
                    }
                }
                out.push(Rgb::new((sum[0] / n) as u8, (sum[1] / n) as u8, (sum[2] / n) as u8));
            }
        }
    }
}

/// Source indices covered by output index `i` of `out`; never empty.
fn span(i: usize, out: usize, src: usize) -> std::ops::Range<usize> {
    let start = i * src / out;
    let end = ((i + 1) * src / out).clamp(start + 1, src);
    start..end
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapCanvas {
    cols: u16,
    rows: u16,
    background: Rgb,
    source: Option<Backdrop>,
    /// `source` scaled to the pixel grid; empty without a source.
    backdrop: Vec<Rgb>,
    pixels: Vec<Rgb>,
}

impl MapCanvas {
    /// Canvas covering `cols × rows` terminal cells (`cols × 2·rows` pixels).
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            background: SEA,
            source: None,
            backdrop: Vec::new(),
            pixels: vec![SEA; cols as usize * rows as usize * 2],
        }
    }

    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self.refresh_backdrop();
        self.clear();
        self
    }

    /// Replace (or remove) the image under the markers and clear to it.
    pub fn set_backdrop(&mut self, backdrop: Option<Backdrop>) {
        self.source = backdrop;
        self.refresh_backdrop();
        self.clear();
    }

    pub fn has_backdrop(&self) -> bool {
        self.source.is_some()
    }

    fn refresh_backdrop(&mut self) {
        let (w, h) = (self.pixel_width(), self.pixel_height());
        match &self.source {
            Some(source) => source.scale_into(w, h, self.background, &mut self.backdrop),
            None => self.backdrop.clear(),
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn pixel_width(&self) -> usize {
        self.cols as usize
    }

    pub fn pixel_height(&self) -> usize {
        self.rows as usize * 2
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        if self.cols == cols && self.rows == rows {
            return;
        }
        self.cols = cols;
        self.rows = rows;
        self.pixels
            .resize(cols as usize * rows as usize * 2, self.background);
        self.refresh_backdrop();
        self.clear();
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.pixel_width() || y >= self.pixel_height() {
            return None;
        }
        Some(self.pixels[y * self.pixel_width() + x])
    }

    fn blend(&mut self, x: usize, y: usize, color: Rgba) {
        if x >= self.pixel_width() || y >= self.pixel_height() || color.a <= 0.0 {
            return;
        }
        let i = y * self.pixel_width() + x;
        self.pixels[i] = color.over(self.pixels[i].tuple()).into();
    }

    /// Visit pixels whose centers are within `reach` of `center`, passing the distance.
    fn for_each_near(&mut self, center: Point, reach: f64, mut f: impl FnMut(&mut Self, usize, usize, f64)) {
        let x0 = (center.x - reach).floor().max(0.0) as usize;
        let y0 = (center.y - reach).floor().max(0.0) as usize;
        let x1 = ((center.x + reach).ceil().max(0.0) as usize).min(self.pixel_width());
        let y1 = ((center.y + reach).ceil().max(0.0) as usize).min(self.pixel_height());
        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f64 + 0.5 - center.x;
                let dy = y as f64 + 0.5 - center.y;
                let d = (dx * dx + dy * dy).sqrt();
                if d <= reach {
                    f(self, x, y, d);
                }
            }
        }
    }

    /// Copy the canvas into `fb` with its top-left cell at `(x, y)`.
    pub fn blit(&self, fb: &mut FrameBuffer, x: u16, y: u16) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let top = self.pixels[(row as usize * 2) * self.pixel_width() + col as usize];
                let bottom = self.pixels[(row as usize * 2 + 1) * self.pixel_width() + col as usize];
                fb.set(
                    x.saturating_add(col),
                    y.saturating_add(row),
                    Cell {
                        ch: '▀',
                        style: CellStyle {
                            fg: top,
                            bg: bottom,
                            bold: false,
                            dim: false,
                        },
                    },
                );
            }
        }
    }
}

impl Surface for MapCanvas {
    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.pixel_width() as f64, self.pixel_height() as f64)
    }

    fn marker_scale(&self) -> f64 {
        (self.pixel_width() as f64 / DESIGN_WIDTH).max(MIN_MARKER_SCALE)
    }

    fn clear(&mut self) {
        if self.backdrop.len() == self.pixels.len() {
            self.pixels.copy_from_slice(&self.backdrop);
        } else {
            self.pixels.fill(self.background);
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        // The center pixel is always painted so tiny markers stay visible.
        self.blend(center.x.max(0.0) as usize, center.y.max(0.0) as usize, color);
        self.for_each_near(center, radius, |canvas, x, y, _| {
            if (x, y) != (center.x.max(0.0) as usize, center.y.max(0.0) as usize) {
                canvas.blend(x, y, color);
            }
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, color: Rgba) {
        let half = (width * 0.5).max(0.5);
        self.for_each_near(center, radius + half, |canvas, x, y, d| {
            if (d - radius).abs() <= half {
                canvas.blend(x, y, color);
            }
        });
    }

    fn glow(&mut self, center: Point, radius: f64, blur: f64, color: Rgba) {
        if blur <= 0.0 {
            return;
        }
        self.for_each_near(center, radius + blur, |canvas, x, y, d| {
            let falloff = if d <= radius {
                1.0
            } else {
                1.0 - (d - radius) / blur
            };
            canvas.blend(x, y, color.with_alpha(color.a * 0.35 * falloff));
        });
    }
}
