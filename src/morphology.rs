//! Morphological filtering with a purely horizontal probe.
//!
//! Opening a binary mask with a `len × 1` rectangle (erosion followed by
//! dilation) keeps exactly the pixels covered by some fully-foreground window
//! of `len` consecutive columns. Within a row this reduces to keeping every
//! foreground run of length `>= len` unchanged and clearing shorter runs, which
//! is what [`open_horizontal`] computes in a single pass per row.
//!
//! Pixels outside the page count as background. A run touching the left or
//! right page edge therefore needs the full probe length to survive; an
//! OpenCV-style opening, whose erosion treats the outside as foreground,
//! keeps somewhat shorter edge-touching runs. Together with the replicated
//! borders of [`crate::filters`] (OpenCV blurs with reflect-101 borders),
//! results may differ from an OpenCV pipeline within a probe length of the
//! left and right page edges.

use crate::image::{ImageView, ImageViewMut, Mask};

/// Remove every horizontal foreground run shorter than `len` pixels.
///
/// Stems, note heads, beams shorter than `len` and text vanish; long
/// horizontal strokes such as staff lines survive untouched.
pub fn open_horizontal(mask: &Mask, len: usize) -> Mask {
    let len = len.max(1);
    let mut out = Mask::new(mask.w, mask.h);
    for y in 0..mask.h {
        let src = mask.row(y);
        let dst = out.row_mut(y);
        let mut x = 0;
        while x < src.len() {
            if src[x] == 0 {
                x += 1;
                continue;
            }
            let start = x;
            while x < src.len() && src[x] != 0 {
                x += 1;
            }
            if x - start >= len {
                dst[start..x].fill(1);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from_rows(rows: &[&str]) -> Mask {
        let mut mask = Mask::new(rows[0].len(), rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                mask.set(x, y, c == '#');
            }
        }
        mask
    }

    #[test]
    fn keeps_long_runs_and_drops_short_ones() {
        let mask = mask_from_rows(&[
            "..######..##..",
            "...#..........",
            "#####.....####",
        ]);
        let opened = open_horizontal(&mask, 4);
        let expected = mask_from_rows(&[
            "..######......",
            "..............",
            "#####.....####",
        ]);
        assert_eq!(opened, expected);
    }

    #[test]
    fn opening_is_idempotent() {
        let mask = mask_from_rows(&[".###.#####.#", "######.##..."]);
        let once = open_horizontal(&mask, 3);
        assert_eq!(open_horizontal(&once, 3), once);
    }

    #[test]
    fn short_runs_touching_the_page_edge_are_removed() {
        let mask = mask_from_rows(&["###......####", "######...####"]);
        let opened = open_horizontal(&mask, 5);
        let expected = mask_from_rows(&[".............", "######......."]);
        assert_eq!(opened, expected);
    }
}
