//! Descriptor inspection
//!
//! Decodes a compiled .dat file and prints its contents in human-readable
//! form. Doubles as a validation pass: malformed files fail here the same
//! way they would fail in a consumer.

use anyhow::{Context, Result};
use sdfont_descriptor::{expand, Descriptor};
use std::path::Path;

/// Decode and print a descriptor file
pub fn run(path: &Path) -> Result<()> {
    let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let descriptor =
        Descriptor::decode(&data).with_context(|| format!("decoding {}", path.display()))?;

    println!("{}", path.display());
    println!("  glyphs:      {}", descriptor.glyphs.len());
    println!("  line height: {:.4}", descriptor.line_height);
    println!("  ascender:    {:.4}", descriptor.ascender);
    println!("  descender:   {:.4}", descriptor.descender);

    println!();
    println!("  code point    advance     size (w x h)          uv rect");
    for glyph in &descriptor.glyphs {
        let display = char::from_u32(glyph.code_point)
            .filter(|c| !c.is_control())
            .map(|c| c.to_string())
            .unwrap_or_else(|| "?".to_string());
        println!(
            "  U+{:04X} {:>3}   {:>8.4}   {:.4} x {:.4}   ({:.4}, {:.4}, {:.4}, {:.4})",
            glyph.code_point,
            display,
            glyph.advance,
            glyph.width,
            glyph.height,
            glyph.uv[0],
            glyph.uv[1],
            glyph.uv[2],
            glyph.uv[3],
        );
    }

    let entries = expand(&descriptor.kerning);
    let nonzero = entries.iter().filter(|v| **v != 0.0).count();
    println!();
    println!(
        "  kerning: {} runs, {} pair entries, {} nonzero",
        descriptor.kerning.len(),
        entries.len(),
        nonzero
    );

    Ok(())
}
