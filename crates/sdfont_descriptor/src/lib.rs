//! Binary glyph descriptor format
//!
//! This crate provides:
//! - Run-length compression of the pairwise kerning matrix
//! - The little-endian binary descriptor layout (writer and reader)
//!
//! The descriptor file records per-glyph geometry, UV rectangles into the
//! atlas, and the compressed kerning table, in a fixed layout shared with
//! runtime text renderers.

pub mod descriptor;
pub mod kerning;
pub mod reader;
pub mod writer;

pub use descriptor::{Descriptor, GlyphRecord};
pub use kerning::{compress, expand, KerningRun};
pub use reader::DescriptorReader;
pub use writer::DescriptorWriter;

use thiserror::Error;

/// Descriptor decoding errors
#[derive(Error, Debug)]
pub enum DescriptorError {
    #[error("Unexpected end of descriptor data")]
    UnexpectedEof,

    #[error("Kerning runs expand to {actual} entries, expected {expected}")]
    KerningCount { expected: u64, actual: u64 },
}

pub type Result<T> = std::result::Result<T, DescriptorError>;
