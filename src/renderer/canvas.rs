//! Raster drawing primitives
//!
//! A thin layer over `image::RgbImage`: filled rectangles, line segments and
//! a heat colour ramp. Coordinates outside the image are clipped.

use std::path::Path;

use glam::DVec2;
use image::{Rgb, RgbImage};

use crate::error::SimResult;

pub type Color = [u8; 3];

pub const BACKGROUND: Color = [16, 16, 24];
pub const AXIS: Color = [200, 200, 210];
pub const GRID_LINE: Color = [48, 48, 60];

/// Map 0..1 onto a heat ramp (black -> blue -> cyan -> green -> yellow -> red)
pub fn heat_color(t: f64) -> Color {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };

    let (r, g, b) = if t < 0.2 {
        // Black to blue
        let u = t / 0.2;
        (0.0, 0.0, 0.8 * u)
    } else if t < 0.4 {
        // Blue to cyan
        let u = (t - 0.2) / 0.2;
        (0.2 * u, 0.8 * u, 0.8 + 0.2 * u)
    } else if t < 0.6 {
        // Cyan to green
        let u = (t - 0.4) / 0.2;
        (0.2, 0.8, 1.0 - 0.6 * u)
    } else if t < 0.8 {
        // Green to yellow
        let u = (t - 0.6) / 0.2;
        (0.2 + 0.8 * u, 0.8, 0.4 - 0.2 * u)
    } else {
        // Yellow to red
        let u = (t - 0.8) / 0.2;
        (1.0, 0.8 - 0.6 * u, 0.2)
    };

    [(r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8]
}

/// Advance between glyphs at scale 1, in pixels
pub const GLYPH_ADVANCE: i64 = 4;

/// 3x5 bitmap for the capitals used in chart labels, top row first; the low
/// three bits of each row are the pixels, leftmost in bit 2
fn glyph(c: char) -> [u8; 5] {
    match c.to_ascii_uppercase() {
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        _ => [0; 5],
    }
}

/// RGB drawing surface
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, Rgb(background)),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        self.image.get_pixel(x, y).0
    }

    /// Set one pixel, ignoring anything off the canvas
    #[inline]
    pub fn put(&mut self, x: i64, y: i64, color: Color) {
        if x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height() {
            self.image.put_pixel(x as u32, y as u32, Rgb(color));
        }
    }

    pub fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: Color) {
        for dy in 0..h as i64 {
            for dx in 0..w as i64 {
                self.put(x + dx, y + dy, color);
            }
        }
    }

    /// Line segment, `thickness` pixels wide
    pub fn line(&mut self, from: DVec2, to: DVec2, thickness: u32, color: Color) {
        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as i64;
        let half = thickness as i64 / 2;
        for i in 0..=steps {
            let p = from + delta * (i as f64 / steps as f64);
            let (x, y) = (p.x.round() as i64, p.y.round() as i64);
            for oy in -half..=half {
                for ox in -half..=half {
                    self.put(x + ox, y + oy, color);
                }
            }
        }
    }

    /// Capital-letter label with its top-left corner at (x, y); unknown
    /// characters render as blanks
    pub fn text(&mut self, x: i64, y: i64, label: &str, scale: u32, color: Color) {
        let scale = scale.max(1);
        let step = scale as i64;
        for (i, c) in label.chars().enumerate() {
            let left = x + i as i64 * GLYPH_ADVANCE * step;
            for (row, bits) in glyph(c).iter().enumerate() {
                for col in 0..3 {
                    if bits & (0b100 >> col) != 0 {
                        self.fill_rect(left + col * step, y + row as i64 * step, scale, scale, color);
                    }
                }
            }
        }
    }

    /// Pixel width of a label drawn with `text`
    pub fn text_width(label: &str, scale: u32) -> i64 {
        label.chars().count() as i64 * GLYPH_ADVANCE * scale.max(1) as i64
    }

    pub fn save(&self, path: &Path) -> SimResult<()> {
        self.image.save(path)?;
        Ok(())
    }
}
