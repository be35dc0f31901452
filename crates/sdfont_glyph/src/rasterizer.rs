//! Glyph rasterization using swash
//!
//! Converts font glyph outlines to 8-bit coverage bitmaps at the requested
//! pixel height.

use crate::font::FontFace;
use crate::{GlyphError, Result};
use swash::scale::{Render, ScaleContext, Source};
use swash::zeno::Format;

/// Rasterized glyph bitmap with placement metrics
///
/// All placement values are in texels relative to the glyph origin on the
/// baseline; `advance` is in (fractional) pixels.
#[derive(Debug, Clone)]
pub struct RasterizedGlyph {
    /// Coverage data (grayscale, 8-bit, row-major, one byte per texel)
    pub bitmap: Vec<u8>,
    /// Bitmap width in texels
    pub width: u32,
    /// Bitmap height in texels
    pub height: u32,
    /// Horizontal offset from origin to the bitmap's left edge
    pub left: i32,
    /// Vertical offset from baseline to the bitmap's top edge
    pub top: i32,
    /// Horizontal advance to the next glyph position
    pub advance: f32,
}

/// Glyph rasterizer using swash
///
/// Each instance owns its own scale context; construct one per pipeline run
/// rather than sharing a global.
pub struct GlyphRasterizer {
    /// Swash scale context (caches scaling state)
    scale_context: ScaleContext,
}

impl GlyphRasterizer {
    /// Create a new glyph rasterizer
    pub fn new() -> Self {
        Self {
            scale_context: ScaleContext::new(),
        }
    }

    /// Rasterize a glyph at the given pixel height
    pub fn rasterize(
        &mut self,
        font: &FontFace,
        glyph_id: u16,
        pixel_height: u32,
    ) -> Result<RasterizedGlyph> {
        let swash_font = swash::FontRef::from_index(font.data(), font.face_index() as usize)
            .ok_or(GlyphError::InvalidFontData)?;

        let size = pixel_height as f32;
        let mut scaler = self
            .scale_context
            .builder(swash_font)
            .size(size)
            .build();

        // Advance comes from the font's metrics tables, scaled from font
        // units to pixels.
        let metrics = swash_font.metrics(&[]);
        let glyph_metrics = swash_font.glyph_metrics(&[]);
        let scale = size / metrics.units_per_em as f32;
        let advance = glyph_metrics.advance_width(glyph_id) * scale;

        let mut render = Render::new(&[Source::Outline]);
        render.format(Format::Alpha);

        match render.render(&mut scaler, glyph_id) {
            Some(img) => Ok(RasterizedGlyph {
                bitmap: img.data,
                width: img.placement.width,
                height: img.placement.height,
                left: img.placement.left,
                top: img.placement.top,
                advance,
            }),
            // Empty glyph (like space) - no bitmap but has advance
            None => Ok(RasterizedGlyph {
                bitmap: Vec::new(),
                width: 0,
                height: 0,
                left: 0,
                top: 0,
                advance,
            }),
        }
    }
}

impl Default for GlyphRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rasterizer_creation() {
        let _rasterizer = GlyphRasterizer::new();
    }
}
