#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod image;
pub mod source;
pub mod staff;
pub mod types;

// Building blocks of the line extractor. Public for tools and experiments.
pub mod binarize;
pub mod filters;
pub mod morphology;
pub mod segments;

pub mod config;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector, batch orchestration and results.
pub use crate::detector::{
    extract_staff_regions, process_document, DocumentDetection, DocumentOptions, PageDetection,
    PageResult, StaffDetector, StaffParams,
};
pub use crate::error::StaffError;
pub use crate::image::RasterImage;
pub use crate::staff::{CroppedRegion, StaffGroup};
pub use crate::types::{BoundingBox, RegionKey};

// Run summaries.
pub use crate::diagnostics::{DocumentSummary, PageSummary};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use staff_detector::prelude::*;
///
/// # fn main() -> Result<(), StaffError> {
/// let (w, h) = (640usize, 480usize);
/// let page = RasterImage::from_gray(w, h, vec![255u8; w * h])?;
///
/// let regions = extract_staff_regions(&page, &StaffParams::default())?;
/// for region in &regions {
///     println!("{} lines in {:?}", region.line_count, region.bbox);
/// }
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::export::{FsRegionSink, RegionSink};
    pub use crate::source::{ImageFileSource, PageSource};
    pub use crate::{
        extract_staff_regions, process_document, CroppedRegion, DocumentOptions, RasterImage,
        StaffDetector, StaffError, StaffParams,
    };
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    pub use crate::segments::{
        extract_line_segments, ExtractionResult, ExtractorOptions, LineExtractor, LineSegment,
        SegmentId,
    };
    pub use crate::staff::{
        cluster_staff_lines, ClusterOptions, Margins, RegionCropper, StaffClusterer,
    };

    pub use crate::diagnostics::{RegionSummary, StageTiming, TimingBreakdown};
}
