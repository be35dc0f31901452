//! Rectangle bin packing
//!
//! Lays variable-sized glyph bitmaps out in a single canvas using a shelf
//! algorithm. Each rectangle is inflated by the gap on all sides; inflated
//! rectangles never overlap and always lie inside the returned canvas.

use tracing::debug;

/// A rectangle's assigned position in the canvas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackedRect {
    /// X origin in texels
    pub x: u32,
    /// Y origin in texels
    pub y: u32,
    /// Width in texels (equal to the source bitmap width)
    pub width: u32,
    /// Height in texels (equal to the source bitmap height)
    pub height: u32,
}

/// Result of packing: one rect per input size, in input order, plus the
/// canvas dimensions that bound all gap-inflated rects.
#[derive(Debug, Clone)]
pub struct Packing {
    pub rects: Vec<PackedRect>,
    pub width: u32,
    pub height: u32,
}

/// A shelf: a horizontal strip of the canvas filled left to right
#[derive(Debug)]
struct Shelf {
    /// Y position of this shelf
    y: u32,
    /// Height of this shelf
    height: u32,
    /// Current X position (next free space)
    x: u32,
}

/// Pack rectangles into a canvas with a fixed inter-rectangle gap
///
/// Placement is deterministic: rectangles are placed tallest first (ties
/// broken by width, then by input index) into the first shelf with room,
/// opening a new shelf below when none fits. Every rectangle keeps at least
/// `gap` texels to the canvas border and at least `2 * gap` texels to any
/// other rectangle.
pub fn pack(sizes: &[(u32, u32)], gap: u32) -> Packing {
    let inflate = 2 * gap;

    let mut order: Vec<usize> = (0..sizes.len()).collect();
    order.sort_by(|&a, &b| {
        let (aw, ah) = sizes[a];
        let (bw, bh) = sizes[b];
        bh.cmp(&ah).then(bw.cmp(&aw)).then(a.cmp(&b))
    });

    // Shelf width target: square-ish canvas, but never narrower than the
    // widest rectangle.
    let total_area: u64 = sizes
        .iter()
        .map(|&(w, h)| (w + inflate) as u64 * (h + inflate) as u64)
        .sum();
    let max_width = sizes.iter().map(|&(w, _)| w + inflate).max().unwrap_or(0);
    let target_width = max_width.max((total_area as f64).sqrt().ceil() as u32);

    let mut shelves: Vec<Shelf> = Vec::new();
    let mut rects = vec![PackedRect::default(); sizes.len()];
    let mut used_width = 0u32;
    let mut used_height = 0u32;

    for idx in order {
        let (w, h) = sizes[idx];
        let iw = w + inflate;
        let ih = h + inflate;

        let shelf_idx = shelves
            .iter()
            .position(|s| s.height >= ih && s.x + iw <= target_width);
        let shelf_idx = match shelf_idx {
            Some(i) => i,
            None => {
                shelves.push(Shelf {
                    y: used_height,
                    height: ih,
                    x: 0,
                });
                used_height += ih;
                shelves.len() - 1
            }
        };
        let shelf = &mut shelves[shelf_idx];

        rects[idx] = PackedRect {
            x: shelf.x + gap,
            y: shelf.y + gap,
            width: w,
            height: h,
        };
        shelf.x += iw;
        used_width = used_width.max(shelf.x);
    }

    debug!(
        rects = sizes.len(),
        width = used_width,
        height = used_height,
        shelves = shelves.len(),
        "packed atlas"
    );

    Packing {
        rects,
        width: used_width,
        height: used_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Gap-inflated bounds of a packed rect
    fn inflated(r: &PackedRect, gap: u32) -> (i64, i64, i64, i64) {
        (
            r.x as i64 - gap as i64,
            r.y as i64 - gap as i64,
            (r.x + r.width + gap) as i64,
            (r.y + r.height + gap) as i64,
        )
    }

    fn assert_valid(sizes: &[(u32, u32)], gap: u32, packing: &Packing) {
        assert_eq!(packing.rects.len(), sizes.len());
        for (i, r) in packing.rects.iter().enumerate() {
            assert_eq!((r.width, r.height), sizes[i]);
            let (x0, y0, x1, y1) = inflated(r, gap);
            assert!(x0 >= 0 && y0 >= 0, "rect {} escapes canvas origin", i);
            assert!(
                x1 <= packing.width as i64 && y1 <= packing.height as i64,
                "rect {} escapes canvas bounds",
                i
            );
        }
        for i in 0..packing.rects.len() {
            for j in (i + 1)..packing.rects.len() {
                let (ax0, ay0, ax1, ay1) = inflated(&packing.rects[i], gap);
                let (bx0, by0, bx1, by1) = inflated(&packing.rects[j], gap);
                let overlap = ax0 < bx1 && bx0 < ax1 && ay0 < by1 && by0 < ay1;
                assert!(!overlap, "inflated rects {} and {} overlap", i, j);
            }
        }
    }

    #[test]
    fn test_no_overlap_mixed_sizes() {
        let sizes = vec![
            (10, 20),
            (8, 8),
            (30, 5),
            (1, 40),
            (16, 16),
            (2, 2),
            (25, 12),
        ];
        let packing = pack(&sizes, 2);
        assert_valid(&sizes, 2, &packing);
    }

    #[test]
    fn test_zero_gap() {
        let sizes = vec![(4, 4), (4, 4), (4, 4), (4, 4)];
        let packing = pack(&sizes, 0);
        assert_valid(&sizes, 0, &packing);
    }

    #[test]
    fn test_zero_area_rects() {
        let sizes = vec![(0, 0), (5, 5), (0, 0)];
        let packing = pack(&sizes, 2);
        assert_valid(&sizes, 2, &packing);
    }

    #[test]
    fn test_empty_input() {
        let packing = pack(&[], 3);
        assert!(packing.rects.is_empty());
        assert_eq!((packing.width, packing.height), (0, 0));
    }

    #[test]
    fn test_deterministic() {
        let sizes = vec![(7, 9), (9, 7), (7, 9), (3, 3), (12, 2)];
        let a = pack(&sizes, 1);
        let b = pack(&sizes, 1);
        assert_eq!(a.rects, b.rects);
        assert_eq!((a.width, a.height), (b.width, b.height));
    }

    #[test]
    fn test_separation_at_least_twice_gap() {
        let gap = 2;
        // The wide rect forces a shelf target wide enough that both squares
        // land on the same shelf.
        let sizes = vec![(6, 6), (6, 6), (20, 1)];
        let packing = pack(&sizes, gap);
        let a = &packing.rects[0];
        let b = &packing.rects[1];
        assert_eq!(a.y, b.y, "squares expected on the same shelf");
        let (left, right) = if a.x < b.x { (a, b) } else { (b, a) };
        let sep = right.x - (left.x + left.width);
        assert!(sep >= 2 * gap);
    }

    #[test]
    fn test_single_rect_margins() {
        let packing = pack(&[(10, 4)], 3);
        let r = &packing.rects[0];
        assert_eq!((r.x, r.y), (3, 3));
        assert_eq!((packing.width, packing.height), (16, 10));
    }
}
