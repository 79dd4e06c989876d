//! Locally adaptive binarization.
//!
//! Each pixel is compared against the mean of its `block × block`
//! neighbourhood minus a fixed offset. The output is inverted: dark ink
//! becomes foreground. Working against a local reference keeps the result
//! stable on scans with uneven illumination.

use crate::filters::{self, BoxFilter};
use crate::image::{ImageF32, ImageView, ImageViewMut, Mask};

/// Mark pixels whose intensity is at most `local_mean - offset` as ink.
///
/// `offset` is expressed in the same `[0, 1]` units as `l`.
pub fn adaptive_threshold_mean(l: &ImageF32, block_size: usize, offset: f32) -> Mask {
    let mean = filters::apply(&BoxFilter::new(block_size), l);
    let mut mask = Mask::new(l.w, l.h);
    for y in 0..l.h {
        let src = l.row(y);
        let reference = mean.row(y);
        let dst = mask.row_mut(y);
        for ((d, &v), &m) in dst.iter_mut().zip(src).zip(reference) {
            *d = u8::from(v <= m - offset);
        }
    }
    mask
}
