//! Reference map image.
//!
//! Marker positions are calibrated in the image's pixel space, so the loader
//! checks its size against the dataset's `mapDimensions`. The decoded frame is
//! box-sampled down to at most [`MAX_SAMPLE_EDGE`] pixels per side, which is
//! far more than any terminal canvas needs, and only that grid is kept.

use std::io::Cursor;

use crate::core::{QuizError, QuizResult};

/// Longest side of the retained sample grid.
pub const MAX_SAMPLE_EDGE: u32 = 512;

/// A decoded reference image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceImage {
    /// Source size in pixels.
    pub width: u32,
    pub height: u32,
    pub sample_width: usize,
    pub sample_height: usize,
    /// Row-major RGBA samples, `sample_width × sample_height`.
    pub pixels: Vec<[u8; 4]>,
}

impl ReferenceImage {
    /// Decode a PNG of any color type and bit depth.
    pub fn from_png(bytes: &[u8]) -> QuizResult<Self> {
        let unavailable = |e: png::DecodingError| QuizError::data_unavailable("map image", e);

        let mut decoder = png::Decoder::new(Cursor::new(bytes));
        decoder
            .set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
        let mut reader = decoder.read_info().map_err(unavailable)?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let frame = reader.next_frame(&mut buf).map_err(unavailable)?;

        let source = Frame {
            data: &buf[..frame.buffer_size()],
            width: frame.width as usize,
            height: frame.height as usize,
            line_size: frame.line_size,
            channels: frame.color_type.samples(),
        };
        let (sample_width, sample_height) = sample_size(frame.width, frame.height);
        Ok(Self {
            width: frame.width,
            height: frame.height,
            sample_width,
            sample_height,
            pixels: source.box_sample(sample_width, sample_height),
        })
    }

    pub fn matches(&self, width: f64, height: f64) -> bool {
        self.width as f64 == width && self.height as f64 == height
    }

    pub fn sample(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.sample_width || y >= self.sample_height {
            return None;
        }
        Some(self.pixels[y * self.sample_width + x])
    }
}

fn sample_size(width: u32, height: u32) -> (usize, usize) {
    let longest = width.max(height).max(1);
    if longest <= MAX_SAMPLE_EDGE {
        return (width as usize, height as usize);
    }
    let scale = |v: u32| ((v as u64 * MAX_SAMPLE_EDGE as u64) / longest as u64).max(1) as usize;
    (scale(width), scale(height))
}

/// 8-bit decoded frame with 1 (gray), 2 (gray+alpha), 3 (RGB) or 4 (RGBA) channels.
struct Frame<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    line_size: usize,
    channels: usize,
}

impl Frame<'_> {
    fn rgba(&self, x: usize, y: usize) -> [u8; 4] {
        let at = y * self.line_size + x * self.channels;
        let px = &self.data[at..at + self.channels];
        match *px {
            [g] => [g, g, g, 255],
            [g, a] => [g, g, g, a],
            [r, g, b] => [r, g, b, 255],
            [r, g, b, a, ..] => [r, g, b, a],
            [] => [0, 0, 0, 0],
        }
    }

    /// Average every source pixel into its `out_w × out_h` cell. Color is
    /// weighted by alpha so transparent pixels do not darken edges.
    fn box_sample(&self, out_w: usize, out_h: usize) -> Vec<[u8; 4]> {
        let columns: Vec<usize> = (0..self.width).map(|x| x * out_w / self.width).collect();
        // r·a, g·a, b·a, a, count
        let mut sums = vec![[0u64; 5]; out_w * out_h];
        for y in 0..self.height {
            let row = (y * out_h / self.height) * out_w;
            for (x, &col) in columns.iter().enumerate() {
                let [r, g, b, a] = self.rgba(x, y);
                let a64 = a as u64;
                let cell = &mut sums[row + col];
                cell[0] += r as u64 * a64;
                cell[1] += g as u64 * a64;
                cell[2] += b as u64 * a64;
                cell[3] += a64;
                cell[4] += 1;
            }
        }
        sums.into_iter()
            .map(|[r, g, b, a, n]| {
                if a == 0 || n == 0 {
                    return [0, 0, 0, 0];
                }
                [(r / a) as u8, (g / a) as u8, (b / a) as u8, (a / n) as u8]
            })
            .collect()
    }
}

/// Encode an 8-bit RGB PNG whose pixels come from `color`.
#[cfg(test)]
pub(crate) fn encode_png(
    width: u32,
    height: u32,
    color: impl Fn(u32, u32) -> [u8; 3],
) -> Vec<u8> {
    let mut out = Vec::new();
    let mut encoder = png::Encoder::new(&mut out, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().unwrap();
    let data: Vec<u8> = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .flat_map(|(x, y)| color(x, y))
        .collect();
    writer.write_image_data(&data).unwrap();
    writer.finish().unwrap();
    out
}
