//! Atlas construction for the sdfont compiler
//!
//! This crate provides:
//! - Shelf-based rectangle bin packing with a fixed inter-glyph gap
//! - Atlas composition (blitting glyph coverage bitmaps into a canvas)
//! - Bounded-search signed-distance-field generation

pub mod canvas;
pub mod distance;
pub mod packer;

pub use canvas::Canvas;
pub use distance::{DistanceField, COVERAGE_THRESHOLD};
pub use packer::{pack, PackedRect, Packing};
