//! Glyph set construction
//!
//! Builds the dense, ordered glyph array the rest of the pipeline consumes:
//! one entry per requested code point, with coverage bitmaps and metrics
//! normalized so 1.0 equals the requested pixel height.

use crate::font::FontFace;
use crate::rasterizer::GlyphRasterizer;
use crate::{GlyphError, Result};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

/// A single glyph ready for packing and serialization
///
/// Metrics are normalized by the requested pixel height; bitmap dimensions
/// stay in texels.
#[derive(Debug, Clone)]
pub struct Glyph {
    /// Unicode code point
    pub code_point: u32,
    /// Bitmap width in texels
    pub width: u32,
    /// Bitmap height in texels
    pub height: u32,
    /// Horizontal advance (normalized)
    pub advance: f32,
    /// Left bearing (normalized)
    pub bearing_left: f32,
    /// Distance the bitmap extends below the baseline (normalized)
    pub bearing_top: f32,
    /// Coverage bitmap (row-major, one byte per texel)
    pub bitmap: Vec<u8>,
}

/// The full set of glyphs for one compiler run
///
/// Glyphs are stored densely in charset order; code-point lookup goes
/// through a separate index map so hot loops can stay on the dense array.
pub struct GlyphSet {
    glyphs: Vec<Glyph>,
    /// Font glyph ids, parallel to `glyphs` (kerning lookup only)
    glyph_ids: Vec<u16>,
    /// Code point -> dense index
    index: FxHashMap<u32, usize>,
    pixel_height: u32,
    line_height: f32,
    ascender: f32,
    descender: f32,
}

impl GlyphSet {
    /// Rasterize every requested code point and collect normalized metrics
    pub fn build(
        face: &FontFace,
        rasterizer: &mut GlyphRasterizer,
        chars: &[char],
        pixel_height: u32,
    ) -> Result<Self> {
        if pixel_height == 0 {
            return Err(GlyphError::InvalidPixelHeight(pixel_height));
        }
        let base_scale = 1.0 / pixel_height as f32;
        let metrics = face.metrics();

        if face.has_vertical_metrics() {
            warn!("font carries vertical advance metrics; vertical advances are ignored");
        }

        // Line metrics are truncated to whole pixels before normalization,
        // matching the quantization of hinted rasterizer output.
        let px = pixel_height as f32;
        let line_height = metrics.scale(metrics.line_height(), px).floor() * base_scale;
        let ascender = metrics.scale(metrics.ascender as i32, px).floor() * base_scale;
        let descender = metrics.scale(metrics.descender as i32, px).floor() * base_scale;

        let mut glyphs = Vec::with_capacity(chars.len());
        let mut glyph_ids = Vec::with_capacity(chars.len());
        let mut index = FxHashMap::default();

        for (i, &c) in chars.iter().enumerate() {
            let glyph_id = face.glyph_id(c);
            let raster = rasterizer.rasterize(face, glyph_id, pixel_height)?;

            glyphs.push(Glyph {
                code_point: c as u32,
                width: raster.width,
                height: raster.height,
                advance: raster.advance.round() * base_scale,
                bearing_left: raster.left as f32 * base_scale,
                bearing_top: (raster.height as i32 - raster.top) as f32 * base_scale,
                bitmap: raster.bitmap,
            });
            glyph_ids.push(glyph_id);
            index.insert(c as u32, i);
        }

        debug!(glyphs = glyphs.len(), pixel_height, "glyph set built");

        Ok(Self {
            glyphs,
            glyph_ids,
            index,
            pixel_height,
            line_height,
            ascender,
            descender,
        })
    }

    /// Compute the row-major NxN kerning matrix, normalized
    ///
    /// Entry (i, j) is the advance adjustment when glyph j follows glyph i.
    /// Values are quantized to whole pixels before normalization so equal
    /// adjustments stay bit-for-bit equal across the matrix.
    pub fn kerning_matrix(&self, face: &FontFace) -> Vec<f32> {
        let units = face.kerning_matrix_units(&self.glyph_ids);
        let metrics = face.metrics();
        let px = self.pixel_height as f32;
        let base_scale = 1.0 / px;

        units
            .into_iter()
            .map(|u| metrics.scale(u as i32, px).floor() * base_scale)
            .collect()
    }

    /// Glyphs in charset order
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Number of glyphs in the set
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Dense index for a code point, if present
    pub fn index_of(&self, code_point: u32) -> Option<usize> {
        self.index.get(&code_point).copied()
    }

    /// Bitmap sizes in charset order, as packer input
    pub fn sizes(&self) -> Vec<(u32, u32)> {
        self.glyphs.iter().map(|g| (g.width, g.height)).collect()
    }

    /// Requested pixel height
    pub fn pixel_height(&self) -> u32 {
        self.pixel_height
    }

    /// Line height (normalized)
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Ascender (normalized)
    pub fn ascender(&self) -> f32 {
        self.ascender
    }

    /// Descender (normalized, typically negative)
    pub fn descender(&self) -> f32 {
        self.descender
    }
}

impl std::fmt::Debug for GlyphSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphSet")
            .field("glyphs", &self.glyphs.len())
            .field("pixel_height", &self.pixel_height)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_pixel_height_rejected() {
        let font = match std::env::var("SDFONT_TEST_FONT") {
            Ok(path) => std::fs::read(path).unwrap(),
            // Without a font fixture the parse error fires first; the
            // ignored test below covers the real path.
            Err(_) => return,
        };
        let face = FontFace::from_data(font).unwrap();
        let mut rasterizer = GlyphRasterizer::new();
        let err = GlyphSet::build(&face, &mut rasterizer, &['A'], 0).unwrap_err();
        assert!(matches!(err, GlyphError::InvalidPixelHeight(0)));
    }

    #[test]
    #[ignore = "requires SDFONT_TEST_FONT pointing at a TTF file"]
    fn test_build_from_real_font() {
        let path = std::env::var("SDFONT_TEST_FONT").expect("SDFONT_TEST_FONT not set");
        let face = FontFace::from_file(std::path::Path::new(&path)).unwrap();
        let mut rasterizer = GlyphRasterizer::new();
        let chars = ['A', 'B'];
        let set = GlyphSet::build(&face, &mut rasterizer, &chars, 32).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.index_of('A' as u32), Some(0));
        assert_eq!(set.index_of('B' as u32), Some(1));
        let a = &set.glyphs()[0];
        assert!(a.width > 0 && a.height > 0);
        assert_eq!(a.bitmap.len(), (a.width * a.height) as usize);
        assert!(a.advance > 0.0);

        let kerning = set.kerning_matrix(&face);
        assert_eq!(kerning.len(), 4);
    }
}
