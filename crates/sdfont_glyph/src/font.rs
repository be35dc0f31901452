//! Font loading and management
//!
//! Provides font parsing via ttf-parser, font metric extraction, and
//! pairwise kerning lookup from the horizontal `kern` subtables.

use crate::{GlyphError, Result};
use std::sync::Arc;
use tracing::warn;

/// Font metrics in font units (typically 1000 or 2048 units per em)
#[derive(Debug, Clone, Copy)]
pub struct FontMetrics {
    /// Units per em (typically 1000 or 2048)
    pub units_per_em: u16,
    /// Ascender (distance from baseline to top of tallest glyph)
    pub ascender: i16,
    /// Descender (distance from baseline to bottom, typically negative)
    pub descender: i16,
    /// Line gap (additional spacing between lines)
    pub line_gap: i16,
}

impl FontMetrics {
    /// Calculate line height in font units
    pub fn line_height(&self) -> i32 {
        self.ascender as i32 - self.descender as i32 + self.line_gap as i32
    }

    /// Scale a font-unit value to pixels
    pub fn scale(&self, value: i32, pixel_height: f32) -> f32 {
        value as f32 * pixel_height / self.units_per_em as f32
    }
}

/// A parsed font face
pub struct FontFace {
    /// Raw font data (kept alive for ttf-parser and swash)
    data: Arc<Vec<u8>>,
    /// Face index within the font file (for TTC files)
    face_index: u32,
    /// Font metrics
    metrics: FontMetrics,
    /// Font family name
    family_name: String,
}

impl FontFace {
    /// Load a font from raw TTF/OTF data (uses face index 0)
    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::from_data_with_index(data, 0)
    }

    /// Load a font from raw TTF/OTF data with a specific face index
    pub fn from_data_with_index(data: Vec<u8>, face_index: u32) -> Result<Self> {
        let data = Arc::new(data);

        let face = ttf_parser::Face::parse(&data, face_index).map_err(|e| match e {
            ttf_parser::FaceParsingError::UnknownMagic => GlyphError::UnsupportedFormat,
            other => GlyphError::FontParse(format!("{:?}", other)),
        })?;

        let metrics = FontMetrics {
            units_per_em: face.units_per_em(),
            ascender: face.ascender(),
            descender: face.descender(),
            line_gap: face.line_gap(),
        };

        let family_name = face
            .names()
            .into_iter()
            .find(|n| n.name_id == ttf_parser::name_id::FAMILY)
            .and_then(|n| n.to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        Ok(Self {
            data,
            face_index,
            metrics,
            family_name,
        })
    }

    /// Load a font from a file path
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let data = std::fs::read(path)
            .map_err(|e| GlyphError::FontLoad(format!("Failed to read file: {}", e)))?;
        Self::from_data(data)
    }

    /// Get font metrics
    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    /// Get font family name
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Get raw font data for rasterization
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get face index within the font file
    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    /// Create a ttf-parser Face for glyph operations
    pub(crate) fn as_ttf_face(&self) -> Option<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.data, self.face_index).ok()
    }

    /// Get glyph ID for a character (0 = missing glyph)
    pub fn glyph_id(&self, c: char) -> u16 {
        self.as_ttf_face()
            .and_then(|face| face.glyph_index(c))
            .map(|id| id.0)
            .unwrap_or(0)
    }

    /// Whether the font carries vertical advance metrics (`vmtx`)
    ///
    /// Vertical advances are never serialized by the compiler; callers
    /// warn once when this returns true.
    pub fn has_vertical_metrics(&self) -> bool {
        self.as_ttf_face()
            .map(|face| face.tables().vmtx.is_some())
            .unwrap_or(false)
    }

    /// Look up kerning for every ordered glyph pair, in font units
    ///
    /// Returns the row-major NxN matrix where entry (i, j) is the advance
    /// adjustment when glyph `ids[j]` follows glyph `ids[i]`. Only
    /// horizontal non-variable `kern` subtables are consulted; the first
    /// subtable reporting a value for a pair wins. Fonts without a `kern`
    /// table kern every pair to zero.
    pub fn kerning_matrix_units(&self, ids: &[u16]) -> Vec<i16> {
        let n = ids.len();
        let mut matrix = vec![0i16; n * n];

        let face = match self.as_ttf_face() {
            Some(face) => face,
            None => return matrix,
        };
        let table = match face.tables().kern {
            Some(table) => table,
            None => return matrix,
        };

        let mut subtables = Vec::new();
        for subtable in table.subtables {
            if !subtable.horizontal {
                warn!("font carries vertical kerning; vertical kerning is ignored");
                continue;
            }
            if subtable.variable {
                continue;
            }
            subtables.push(subtable);
        }

        for (i, &left) in ids.iter().enumerate() {
            for (j, &right) in ids.iter().enumerate() {
                let left = ttf_parser::GlyphId(left);
                let right = ttf_parser::GlyphId(right);
                let value = subtables
                    .iter()
                    .find_map(|s| s.glyphs_kerning(left, right))
                    .unwrap_or(0);
                matrix[i * n + j] = value;
            }
        }

        matrix
    }
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family_name", &self.family_name)
            .field("units_per_em", &self.metrics.units_per_em)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_data_is_unsupported() {
        let err = FontFace::from_data(vec![0u8; 64]).unwrap_err();
        assert!(matches!(err, GlyphError::UnsupportedFormat));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = FontFace::from_file(std::path::Path::new("/nonexistent/font.ttf")).unwrap_err();
        assert!(matches!(err, GlyphError::FontLoad(_)));
    }

    #[test]
    fn test_line_height_combines_metrics() {
        let metrics = FontMetrics {
            units_per_em: 1000,
            ascender: 800,
            descender: -200,
            line_gap: 50,
        };
        assert_eq!(metrics.line_height(), 1050);
        assert_eq!(metrics.scale(500, 32.0), 16.0);
    }
}
