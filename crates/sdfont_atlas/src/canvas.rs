//! Atlas composition
//!
//! Blits glyph coverage bitmaps into a single full-resolution canvas at
//! their packed positions, and computes the normalized UV rectangles the
//! descriptor references.

use crate::packer::{PackedRect, Packing};
use sdfont_glyph::Glyph;
use tracing::debug;

/// Full-resolution composed atlas (grayscale coverage)
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Create an empty canvas; dimensions are clamped to at least one texel
    /// so downstream aspect math never divides by zero.
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![0; (width * height) as usize],
        }
    }

    /// Compose the canvas for a glyph set and its packing
    pub fn compose(glyphs: &[Glyph], packing: &Packing) -> Self {
        let mut canvas = Self::new(packing.width, packing.height);
        for (glyph, rect) in glyphs.iter().zip(&packing.rects) {
            canvas.blit(&glyph.bitmap, glyph.width, glyph.height, rect.x, rect.y);
        }
        debug!(
            width = canvas.width,
            height = canvas.height,
            glyphs = glyphs.len(),
            "composed atlas canvas"
        );
        canvas
    }

    /// Copy a coverage bitmap to the given origin
    pub fn blit(&mut self, bitmap: &[u8], bw: u32, bh: u32, x: u32, y: u32) {
        for row in 0..bh {
            let src_offset = (row * bw) as usize;
            let dst_offset = ((y + row) * self.width + x) as usize;
            let row_len = bw as usize;
            if src_offset + row_len <= bitmap.len() && dst_offset + row_len <= self.pixels.len() {
                self.pixels[dst_offset..dst_offset + row_len]
                    .copy_from_slice(&bitmap[src_offset..src_offset + row_len]);
            }
        }
    }

    /// Normalized UV rectangle (u, v, w, h) for a packed rect
    ///
    /// Normalization is by canvas dimensions. The distance transform scales
    /// each axis independently, so these coordinates denote the same
    /// location in the downsampled atlas; renderers sample it with them
    /// directly.
    pub fn uv_rect(&self, rect: &PackedRect) -> [f32; 4] {
        let u_scale = 1.0 / self.width as f32;
        let v_scale = 1.0 / self.height as f32;
        [
            rect.x as f32 * u_scale,
            rect.y as f32 * v_scale,
            rect.width as f32 * u_scale,
            rect.height as f32 * v_scale,
        ]
    }

    /// Canvas width in texels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in texels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw coverage data (row-major)
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
