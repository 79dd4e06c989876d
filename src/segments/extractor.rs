use super::components::ComponentBounds;
use super::options::ExtractorOptions;
use super::segment::{LineSegment, SegmentId};
use crate::binarize::adaptive_threshold_mean;
use crate::diagnostics::TimingBreakdown;
use crate::error::StaffError;
use crate::filters::{self, GAUSSIAN_3TAP};
use crate::image::{Mask, RasterImage};
use crate::morphology::open_horizontal;
use log::debug;
use std::time::Instant;

const NEIGH_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Output of one extraction run.
#[derive(Clone, Debug)]
pub struct ExtractionResult {
    pub segments: Vec<LineSegment>,
    /// Ink mask after the horizontal opening.
    pub mask: Mask,
    /// Probe length used for the opening.
    pub probe_length: usize,
    /// Minimum accepted segment length.
    pub min_length: usize,
    pub timings: TimingBreakdown,
}

/// Turns a page raster into candidate staff-line segments.
#[derive(Clone, Debug, Default)]
pub struct LineExtractor {
    options: ExtractorOptions,
}

impl LineExtractor {
    pub fn new(options: ExtractorOptions) -> Result<Self, StaffError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &ExtractorOptions {
        &self.options
    }

    /// Extract segments only.
    pub fn extract(&self, image: &RasterImage) -> Vec<LineSegment> {
        self.extract_with_mask(image).segments
    }

    /// Extract segments and keep the opened line mask for debugging.
    pub fn extract_with_mask(&self, image: &RasterImage) -> ExtractionResult {
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let stage = Instant::now();
        let intensity = image.to_intensity();
        timings.push("intensity", elapsed_ms(stage));

        let smoothed = if self.options.blur {
            let stage = Instant::now();
            let out = filters::apply(&GAUSSIAN_3TAP, &intensity);
            timings.push("blur", elapsed_ms(stage));
            out
        } else {
            intensity
        };

        let stage = Instant::now();
        let ink = adaptive_threshold_mean(
            &smoothed,
            self.options.block_size,
            self.options.offset_normalized(),
        );
        timings.push("threshold", elapsed_ms(stage));

        let probe_length = self.options.probe_length(image.width());
        let min_length = self.options.min_length(image.width());

        let stage = Instant::now();
        let mask = open_horizontal(&ink, probe_length);
        timings.push("opening", elapsed_ms(stage));

        let stage = Instant::now();
        let segments = segments_from_components(&mask, min_length);
        timings.push("components", elapsed_ms(stage));
        timings.total_ms = elapsed_ms(total_start);

        debug!(
            "LineExtractor: {}x{} ink={} opened={} probe={} min_len={} segments={} ({:.3} ms)",
            image.width(),
            image.height(),
            ink.count(),
            mask.count(),
            probe_length,
            min_length,
            segments.len(),
            timings.total_ms
        );

        ExtractionResult {
            segments,
            mask,
            probe_length,
            min_length,
            timings,
        }
    }
}

/// Label 8-connected components of `mask` in raster order and emit one
/// segment per component whose bounding rectangle is at least `min_length`
/// wide.
fn segments_from_components(mask: &Mask, min_length: usize) -> Vec<LineSegment> {
    let (w, h) = (mask.w, mask.h);
    let mut visited = vec![false; w * h];
    let mut stack: Vec<usize> = Vec::new();
    let mut segments = Vec::new();

    for seed in 0..w * h {
        if visited[seed] || mask.data[seed] == 0 {
            continue;
        }
        visited[seed] = true;
        stack.push(seed);
        let mut bounds = ComponentBounds::seed(seed % w, seed / w);
        while let Some(idx) = stack.pop() {
            let (x, y) = (idx % w, idx / w);
            for (dx, dy) in NEIGH_OFFSETS {
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                    continue;
                }
                let nidx = ny as usize * w + nx as usize;
                if !visited[nidx] && mask.data[nidx] != 0 {
                    visited[nidx] = true;
                    bounds.push(nx as usize, ny as usize);
                    stack.push(nidx);
                }
            }
        }
        if bounds.width() >= min_length {
            let id = SegmentId(segments.len() as u32);
            segments.push(LineSegment::new(id, bounds.x0, bounds.x1, bounds.mid_row()));
        }
    }
    segments
}

#[inline]
fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
