//! Horizontal line extraction (the first stage of staff detection).
//!
//! The extractor isolates long horizontal ink strokes on a page raster:
//!
//! - Intensity conversion to a `[0, 1]` plane.
//! - A 3-tap Gaussian smoothing pass to suppress scan noise.
//! - Adaptive mean binarization (see [`crate::binarize`]), inverted so that
//!   ink is foreground.
//! - A morphological opening with a purely horizontal probe of length
//!   `min(width / 4, 100)` px by default (see [`crate::morphology`]). Stems,
//!   note heads and text are removed; staff lines survive.
//! - 8-connected component labelling on the opened mask. Each component's
//!   bounding rectangle becomes a [`LineSegment`] through the rectangle's
//!   vertical middle, spanning its full horizontal extent, provided it is at
//!   least half the probe length wide.
//!
//! A blank page yields an empty segment list. Segment order follows component
//! discovery in raster order; callers must not rely on it.

mod components;
mod extractor;
mod options;
mod segment;

pub use extractor::{ExtractionResult, LineExtractor};
pub use options::{ExtractorOptions, MAX_BLOCK_SIZE};
pub use segment::{LineSegment, SegmentId};

use crate::error::StaffError;
use crate::image::RasterImage;

/// Validate `options` and run the extractor once.
pub fn extract_line_segments(
    image: &RasterImage,
    options: ExtractorOptions,
) -> Result<ExtractionResult, StaffError> {
    Ok(LineExtractor::new(options)?.extract_with_mask(image))
}
