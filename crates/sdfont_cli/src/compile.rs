//! The compile pipeline
//!
//! Runs the batch pipeline in strict order: load font, rasterize the glyph
//! set, extract kerning, pack, compose the canvas, generate the distance
//! field, then write both output artifacts. Nothing is written until every
//! stage has succeeded.

use anyhow::{bail, Context, Result};
use sdfont_atlas::{pack, Canvas, DistanceField, Packing};
use sdfont_descriptor::{compress, Descriptor, GlyphRecord};
use sdfont_glyph::{code_points, default_charset, FontFace, GlyphRasterizer, GlyphSet};
use std::path::{Path, PathBuf};
use tracing::info;

/// Arguments to the compile command
pub struct CompileArgs {
    pub font_path: PathBuf,
    pub pixel_height: u32,
    pub gap: u32,
    pub search_radius: u32,
    pub output_size: u32,
    pub chars: Option<String>,
    pub out: Option<PathBuf>,
}

/// Run the full compile pipeline
pub fn run(args: CompileArgs) -> Result<()> {
    if args.pixel_height == 0 {
        bail!("pixel height must be at least 1");
    }
    if args.search_radius == 0 {
        bail!("search radius must be at least 1");
    }
    if args.output_size == 0 {
        bail!("output size must be at least 1");
    }

    let charset = args.chars.clone().unwrap_or_else(default_charset);
    let chars = code_points(&charset);

    let face = FontFace::from_file(&args.font_path)
        .with_context(|| format!("loading {}", args.font_path.display()))?;
    info!(
        family = face.family_name(),
        glyphs = chars.len(),
        pixel_height = args.pixel_height,
        "compiling font"
    );

    let mut rasterizer = GlyphRasterizer::new();
    let set = GlyphSet::build(&face, &mut rasterizer, &chars, args.pixel_height)?;
    let kerning_matrix = set.kerning_matrix(&face);

    let packing = pack(&set.sizes(), args.gap);
    info!(width = packing.width, height = packing.height, "canvas packed");

    let canvas = Canvas::compose(set.glyphs(), &packing);
    let field = DistanceField::generate(&canvas, args.output_size, args.search_radius);
    info!(
        width = field.width(),
        height = field.height(),
        "distance atlas generated"
    );

    let descriptor = build_descriptor(&set, &canvas, &packing, &kerning_matrix);

    // All computation done; only now touch the filesystem, so a failing run
    // never leaves partial output behind.
    let prefix = args.out.as_deref().unwrap_or(&args.font_path);
    let png_path = with_suffix(prefix, "png");
    let dat_path = with_suffix(prefix, "dat");

    write_png(&field, &png_path)?;
    std::fs::write(&dat_path, descriptor.encode())
        .with_context(|| format!("writing {}", dat_path.display()))?;

    info!(
        png = %png_path.display(),
        dat = %dat_path.display(),
        "compile finished"
    );
    Ok(())
}

/// Assemble the descriptor from pipeline results
fn build_descriptor(
    set: &GlyphSet,
    canvas: &Canvas,
    packing: &Packing,
    kerning_matrix: &[f32],
) -> Descriptor {
    let base_scale = 1.0 / set.pixel_height() as f32;

    let glyphs = set
        .glyphs()
        .iter()
        .zip(&packing.rects)
        .map(|(glyph, rect)| GlyphRecord {
            code_point: glyph.code_point,
            advance: glyph.advance,
            bearing_left: glyph.bearing_left,
            bearing_top: glyph.bearing_top,
            width: glyph.width as f32 * base_scale,
            height: glyph.height as f32 * base_scale,
            uv: canvas.uv_rect(rect),
        })
        .collect();

    Descriptor {
        line_height: set.line_height(),
        ascender: set.ascender(),
        descender: set.descender(),
        glyphs,
        kerning: compress(kerning_matrix),
    }
}

/// Append an extension to the full prefix path ("font.ttf" -> "font.ttf.png")
fn with_suffix(prefix: &Path, ext: &str) -> PathBuf {
    let mut path = prefix.as_os_str().to_os_string();
    path.push(format!(".{ext}"));
    PathBuf::from(path)
}

/// Write the distance field as a 3-channel PNG, value replicated per channel
fn write_png(field: &DistanceField, path: &Path) -> Result<()> {
    let mut rgb = Vec::with_capacity(field.pixels().len() * 3);
    for &value in field.pixels() {
        rgb.extend_from_slice(&[value, value, value]);
    }
    let image = image::RgbImage::from_raw(field.width(), field.height(), rgb)
        .context("atlas buffer size mismatch")?;
    image
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdfont_descriptor::expand;

    #[test]
    fn test_with_suffix_appends() {
        assert_eq!(
            with_suffix(Path::new("fonts/sans.ttf"), "png"),
            PathBuf::from("fonts/sans.ttf.png")
        );
        assert_eq!(
            with_suffix(Path::new("out/atlas"), "dat"),
            PathBuf::from("out/atlas.dat")
        );
    }

    #[test]
    fn test_zero_pixel_height_rejected() {
        let err = run(CompileArgs {
            font_path: PathBuf::from("/nonexistent.ttf"),
            pixel_height: 0,
            gap: 2,
            search_radius: 4,
            output_size: 64,
            chars: None,
            out: None,
        })
        .unwrap_err();
        assert!(err.to_string().contains("pixel height"));
    }

    #[test]
    #[ignore = "requires SDFONT_TEST_FONT pointing at a TTF file"]
    fn test_compile_two_glyphs_end_to_end() {
        let font = std::env::var("SDFONT_TEST_FONT").expect("SDFONT_TEST_FONT not set");
        let out = std::env::temp_dir().join("sdfont_ab_test");

        run(CompileArgs {
            font_path: PathBuf::from(&font),
            pixel_height: 32,
            gap: 2,
            search_radius: 4,
            output_size: 64,
            chars: Some("AB".to_string()),
            out: Some(out.clone()),
        })
        .unwrap();

        // Descriptor reports both glyphs and a full 2x2 kerning matrix.
        let data = std::fs::read(with_suffix(&out, "dat")).unwrap();
        let descriptor = Descriptor::decode(&data).unwrap();
        assert_eq!(descriptor.glyphs.len(), 2);
        assert_eq!(descriptor.glyphs[0].code_point, 'A' as u32);
        assert_eq!(descriptor.glyphs[1].code_point, 'B' as u32);
        assert_eq!(expand(&descriptor.kerning).len(), 4);

        // Atlas PNG has 64 texels on its longer axis.
        let (w, h) = image::image_dimensions(with_suffix(&out, "png")).unwrap();
        assert_eq!(w.max(h), 64);

        // Packed rects keep at least the gap to each other (checked via the
        // packer directly, same inputs as the pipeline).
        let face = FontFace::from_file(Path::new(&font)).unwrap();
        let mut rasterizer = GlyphRasterizer::new();
        let set = GlyphSet::build(&face, &mut rasterizer, &['A', 'B'], 32).unwrap();
        let packing = pack(&set.sizes(), 2);
        let a = &packing.rects[0];
        let b = &packing.rects[1];
        let dx = (b.x as i64 - (a.x + a.width) as i64).max(a.x as i64 - (b.x + b.width) as i64);
        let dy = (b.y as i64 - (a.y + a.height) as i64).max(a.y as i64 - (b.y + b.height) as i64);
        assert!(dx >= 2 || dy >= 2, "glyphs packed closer than the gap");
    }
}
