//! Descriptor model and fixed binary layout
//!
//! File layout (all fields little-endian):
//! 1. `u32` glyph count N
//! 2. `f32` x3: line height, ascender, descender (normalized)
//! 3. N records of 40 bytes: `u32` code point; `f32` advance, bearing-left,
//!    bearing-top, width, height; `f32` x4 UV rectangle (u, v, w, h)
//! 4. kerning runs of 8 bytes each (`f32` value, `u32` count) until
//!    end-of-file; runs must expand to exactly N^2 entries

use crate::kerning::KerningRun;
use crate::reader::DescriptorReader;
use crate::writer::DescriptorWriter;
use crate::{DescriptorError, Result};

/// Per-glyph serialized record
///
/// All metric fields are normalized so 1.0 equals the requested pixel
/// height. The UV rectangle is normalized by canvas dimensions; the
/// distance transform preserves per-axis normalized position, so the same
/// coordinates address the downsampled atlas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphRecord {
    /// Unicode code point
    pub code_point: u32,
    /// Horizontal advance
    pub advance: f32,
    /// Left bearing
    pub bearing_left: f32,
    /// Distance the bitmap extends below the baseline
    pub bearing_top: f32,
    /// Bitmap width (normalized)
    pub width: f32,
    /// Bitmap height (normalized)
    pub height: f32,
    /// UV rectangle (u, v, w, h)
    pub uv: [f32; 4],
}

/// The complete descriptor: font metrics, glyph records, kerning runs
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    /// Line height (normalized)
    pub line_height: f32,
    /// Ascender (normalized)
    pub ascender: f32,
    /// Descender (normalized, typically negative)
    pub descender: f32,
    /// Glyph records in charset order
    pub glyphs: Vec<GlyphRecord>,
    /// Compressed kerning matrix (must expand to glyph count squared)
    pub kerning: Vec<KerningRun>,
}

impl Descriptor {
    /// Encode to the fixed binary layout
    pub fn encode(&self) -> Vec<u8> {
        let mut w = DescriptorWriter::new();

        w.put_u32(self.glyphs.len() as u32);
        w.put_f32(self.line_height);
        w.put_f32(self.ascender);
        w.put_f32(self.descender);

        for glyph in &self.glyphs {
            w.put_u32(glyph.code_point);
            w.put_f32(glyph.advance);
            w.put_f32(glyph.bearing_left);
            w.put_f32(glyph.bearing_top);
            w.put_f32(glyph.width);
            w.put_f32(glyph.height);
            w.put_f32(glyph.uv[0]);
            w.put_f32(glyph.uv[1]);
            w.put_f32(glyph.uv[2]);
            w.put_f32(glyph.uv[3]);
        }

        for run in &self.kerning {
            w.put_f32(run.value);
            w.put_u32(run.count);
        }

        w.into_bytes()
    }

    /// Decode from the fixed binary layout
    ///
    /// Kerning runs are read until end-of-input and validated to expand to
    /// exactly N^2 entries.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut r = DescriptorReader::new(data);

        let count = r.take_u32()? as usize;
        let line_height = r.take_f32()?;
        let ascender = r.take_f32()?;
        let descender = r.take_f32()?;

        let mut glyphs = Vec::with_capacity(count);
        for _ in 0..count {
            glyphs.push(GlyphRecord {
                code_point: r.take_u32()?,
                advance: r.take_f32()?,
                bearing_left: r.take_f32()?,
                bearing_top: r.take_f32()?,
                width: r.take_f32()?,
                height: r.take_f32()?,
                uv: [r.take_f32()?, r.take_f32()?, r.take_f32()?, r.take_f32()?],
            });
        }

        let mut kerning = Vec::new();
        let mut expanded: u64 = 0;
        while !r.is_exhausted() {
            let value = r.take_f32()?;
            let run_count = r.take_u32()?;
            expanded += run_count as u64;
            kerning.push(KerningRun {
                value,
                count: run_count,
            });
        }

        let expected = count as u64 * count as u64;
        if expanded != expected {
            return Err(DescriptorError::KerningCount {
                expected,
                actual: expanded,
            });
        }

        Ok(Self {
            line_height,
            ascender,
            descender,
            glyphs,
            kerning,
        })
    }
}
