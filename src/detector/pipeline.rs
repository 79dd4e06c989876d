use super::params::StaffParams;
use crate::diagnostics::TimingBreakdown;
use crate::error::StaffError;
use crate::image::{Mask, RasterImage};
use crate::segments::{ExtractionResult, LineExtractor, LineSegment};
use crate::staff::{CroppedRegion, RegionCropper, StaffClusterer, StaffGroup};
use log::debug;
use std::time::Instant;

/// Everything detected on one page.
#[derive(Clone, Debug)]
pub struct PageDetection {
    pub width: usize,
    pub height: usize,
    /// All extracted line segments, including those not assigned to a staff.
    pub segments: Vec<LineSegment>,
    /// Staves, top to bottom.
    pub groups: Vec<StaffGroup>,
    /// One crop per entry of `groups`, same order.
    pub regions: Vec<CroppedRegion>,
    pub probe_length: usize,
    pub timings: TimingBreakdown,
    /// Opened line mask, kept when requested.
    pub line_mask: Option<Mask>,
}

/// Staff detector running extraction, clustering and cropping on one page.
///
/// Holds no per-page state, so one detector can serve many pages
/// concurrently.
#[derive(Clone, Debug)]
pub struct StaffDetector {
    params: StaffParams,
    extractor: LineExtractor,
    clusterer: StaffClusterer,
    cropper: RegionCropper,
    keep_line_mask: bool,
}

impl StaffDetector {
    /// Create a detector, validating every parameter up front.
    pub fn new(params: StaffParams) -> Result<Self, StaffError> {
        Ok(Self {
            params,
            extractor: LineExtractor::new(params.extractor)?,
            clusterer: StaffClusterer::new(params.clustering)?,
            cropper: RegionCropper::new(params.margins)?,
            keep_line_mask: false,
        })
    }

    /// Keep the opened line mask in every [`PageDetection`].
    pub fn with_line_mask(mut self, keep: bool) -> Self {
        self.keep_line_mask = keep;
        self
    }

    pub fn params(&self) -> &StaffParams {
        &self.params
    }

    /// Run the full pipeline on one page.
    pub fn process(&self, image: &RasterImage) -> Result<PageDetection, StaffError> {
        let total_start = Instant::now();

        let ExtractionResult {
            segments,
            mask,
            probe_length,
            timings: extract_timings,
            ..
        } = self.extractor.extract_with_mask(image);

        let mut timings = TimingBreakdown::default();
        timings.extend(extract_timings);

        let stage = Instant::now();
        let groups = self.clusterer.cluster(&segments);
        timings.push("clustering", stage.elapsed().as_secs_f64() * 1000.0);

        let stage = Instant::now();
        let regions = groups
            .iter()
            .map(|group| self.cropper.crop(group, image))
            .collect::<Result<Vec<_>, _>>()?;
        timings.push("cropping", stage.elapsed().as_secs_f64() * 1000.0);
        timings.total_ms = total_start.elapsed().as_secs_f64() * 1000.0;

        debug!(
            "StaffDetector::process {}x{} segments={} staves={} ({:.3} ms)",
            image.width(),
            image.height(),
            segments.len(),
            groups.len(),
            timings.total_ms
        );

        Ok(PageDetection {
            width: image.width(),
            height: image.height(),
            segments,
            groups,
            regions,
            probe_length,
            timings,
            line_mask: self.keep_line_mask.then_some(mask),
        })
    }
}

/// One-shot entry point: validate `params`, detect staves on `image` and
/// return one padded crop per staff, top to bottom.
pub fn extract_staff_regions(
    image: &RasterImage,
    params: &StaffParams,
) -> Result<Vec<CroppedRegion>, StaffError> {
    Ok(StaffDetector::new(*params)?.process(image)?.regions)
}
