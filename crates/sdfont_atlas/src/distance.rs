//! Signed-distance-field generation
//!
//! Downsamples the composed coverage canvas into an image whose texels
//! encode the signed Euclidean distance to the nearest coverage transition,
//! found by a bounded square search around each sample point. This is the
//! dominant cost of the whole pipeline; rows are evaluated in parallel.

use crate::canvas::Canvas;
use rayon::prelude::*;
use tracing::debug;

/// Coverage at or above this value counts as inside the glyph
pub const COVERAGE_THRESHOLD: u8 = 128;

/// Downsampled signed-distance image
///
/// Texel values: 0 = far outside, 255 = far inside, with the coverage
/// boundary mapped near the midpoint of the range.
pub struct DistanceField {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl DistanceField {
    /// Generate a distance field from a composed canvas
    ///
    /// The longer canvas axis maps to `output_size`; the shorter axis scales
    /// proportionally, rounded up. `search_radius` bounds the neighborhood
    /// searched for a coverage transition, in source texels; samples with no
    /// transition in range saturate to the extreme value for their side.
    pub fn generate(canvas: &Canvas, output_size: u32, search_radius: u32) -> Self {
        let cw = canvas.width();
        let ch = canvas.height();
        let output_size = output_size.max(1);
        let radius = search_radius.max(1) as i64;

        let (ow, oh) = if cw > ch {
            (
                output_size,
                ((ch as f32 * output_size as f32) / cw as f32).ceil() as u32,
            )
        } else {
            (
                ((cw as f32 * output_size as f32) / ch as f32).ceil() as u32,
                output_size,
            )
        };

        let mut pixels = vec![0u8; (ow * oh) as usize];
        pixels
            .par_chunks_mut(ow as usize)
            .enumerate()
            .for_each(|(oy, row)| {
                let sy = (oy as u64 * ch as u64 / oh as u64) as i64;
                for (ox, out) in row.iter_mut().enumerate() {
                    let sx = (ox as u64 * cw as u64 / ow as u64) as i64;
                    *out = sample(canvas, sx, sy, radius);
                }
            });

        debug!(width = ow, height = oh, radius, "distance field generated");

        Self {
            width: ow,
            height: oh,
            pixels,
        }
    }

    /// Output width in texels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Output height in texels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw distance values (row-major)
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl std::fmt::Debug for DistanceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DistanceField")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Signed distance at one source location, encoded to 8 bits
fn sample(canvas: &Canvas, sx: i64, sy: i64, radius: i64) -> u8 {
    let inside = coverage_at(canvas, sx, sy);

    // Squared distance to the nearest opposite-coverage texel, saturating
    // at the search radius.
    let mut best_sq = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx == 0 && dy == 0 {
                continue;
            }
            let d_sq = dx * dx + dy * dy;
            if d_sq >= best_sq {
                continue;
            }
            if coverage_at(canvas, sx + dx, sy + dy) != inside {
                best_sq = d_sq;
            }
        }
    }

    let distance = (best_sq as f32).sqrt();
    let signed = if inside { distance } else { -distance };
    let norm = 0.5 + 0.5 * signed / radius as f32;
    (norm * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Inside/outside state of a source texel; out-of-bounds is background
fn coverage_at(canvas: &Canvas, x: i64, y: i64) -> bool {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return false;
    }
    canvas.pixels()[(y as u32 * canvas.width() + x as u32) as usize] >= COVERAGE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Canvas from a closure over (x, y)
    fn canvas_from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> Canvas {
        let mut canvas = Canvas::new(width, height);
        let mut bitmap = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                bitmap.push(f(x, y));
            }
        }
        canvas.blit(&bitmap, width, height, 0, 0);
        canvas
    }

    #[test]
    fn test_aspect_ratio_wide() {
        let canvas = Canvas::new(100, 40);
        let field = DistanceField::generate(&canvas, 64, 4);
        assert_eq!(field.width(), 64);
        // ceil(40 * 64 / 100) = ceil(25.6) = 26
        assert_eq!(field.height(), 26);
    }

    #[test]
    fn test_aspect_ratio_tall_and_square() {
        let canvas = Canvas::new(40, 100);
        let field = DistanceField::generate(&canvas, 64, 4);
        assert_eq!((field.width(), field.height()), (26, 64));

        let canvas = Canvas::new(80, 80);
        let field = DistanceField::generate(&canvas, 64, 4);
        assert_eq!((field.width(), field.height()), (64, 64));
    }

    #[test]
    fn test_all_background_saturates_low() {
        let canvas = Canvas::new(32, 32);
        let field = DistanceField::generate(&canvas, 16, 4);
        assert!(field.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_all_foreground_saturates_high_inside() {
        let canvas = canvas_from_fn(32, 32, |_, _| 255);
        let field = DistanceField::generate(&canvas, 16, 4);
        // Border texels still see out-of-bounds background within the search
        // radius; texels deeper than the radius saturate to 255.
        let center = field.pixels()[(8 * field.width() + 8) as usize];
        assert_eq!(center, 255);
    }

    #[test]
    fn test_straight_edge_is_monotone() {
        // Left half inside, right half outside, at 1:1 scale.
        let canvas = canvas_from_fn(32, 32, |x, _| if x < 16 { 255 } else { 0 });
        let radius = 4;
        let field = DistanceField::generate(&canvas, 32, radius);
        assert_eq!((field.width(), field.height()), (32, 32));

        let row = 16;
        let values: Vec<u8> = (0..32)
            .map(|x| field.pixels()[(row * field.width() + x) as usize])
            .collect();

        // Inside of the edge maps at or above the midpoint, outside below.
        assert!(values[15] >= 128, "inside edge texel {} below mid", values[15]);
        assert!(values[16] < 128, "outside edge texel {} at/above mid", values[16]);

        // Values fall monotonically moving right (inside -> outside),
        // ignoring the left canvas border where out-of-bounds background
        // reads as a nearby edge.
        for x in (radius as usize)..31 {
            assert!(
                values[x] >= values[x + 1],
                "non-monotone at x={}: {} < {}",
                x,
                values[x],
                values[x + 1]
            );
        }

        // Beyond the search radius both sides saturate.
        assert_eq!(values[8], 255);
        assert_eq!(values[31], 0);
    }

    #[test]
    fn test_isolated_dot_decays_radially() {
        let canvas = canvas_from_fn(33, 33, |x, y| if x == 16 && y == 16 { 255 } else { 0 });
        let field = DistanceField::generate(&canvas, 33, 4);
        let at = |x: u32, y: u32| field.pixels()[(y * field.width() + x) as usize];

        // The dot itself is inside; its neighbors are outside and get
        // closer to the midpoint the nearer they are to the dot.
        assert!(at(16, 16) >= 128);
        assert!(at(17, 16) < 128);
        assert!(at(17, 16) > at(19, 16));
        assert!(at(19, 16) > at(25, 16));
        assert_eq!(at(0, 16), 0);
    }
}
