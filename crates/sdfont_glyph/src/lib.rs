//! Glyph source for the sdfont compiler
//!
//! This crate provides:
//! - Font loading and parsing (TTF/OTF via ttf-parser)
//! - Glyph rasterization (coverage bitmaps via swash)
//! - Pairwise kerning extraction from the `kern` table
//! - Character-set handling and the built-in Latin-1 default set

pub mod charset;
pub mod font;
pub mod rasterizer;
pub mod set;

pub use charset::{code_points, default_charset};
pub use font::{FontFace, FontMetrics};
pub use rasterizer::{GlyphRasterizer, RasterizedGlyph};
pub use set::{Glyph, GlyphSet};

use thiserror::Error;

/// Glyph source errors
#[derive(Error, Debug)]
pub enum GlyphError {
    #[error("Failed to load font: {0}")]
    FontLoad(String),

    #[error("Unsupported font format")]
    UnsupportedFormat,

    #[error("Failed to parse font: {0}")]
    FontParse(String),

    #[error("Invalid pixel height: {0}")]
    InvalidPixelHeight(u32),

    #[error("Invalid font data")]
    InvalidFontData,
}

pub type Result<T> = std::result::Result<T, GlyphError>;
