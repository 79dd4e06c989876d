use crate::error::StaffError;
use serde::{Deserialize, Serialize};

/// Largest accepted adaptive-threshold window side in pixels.
pub const MAX_BLOCK_SIZE: usize = 255;

/// Options controlling line extraction.
///
/// Pixel quantities refer to the resolution of the page raster. The defaults
/// suit pages rendered at roughly 200 DPI.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorOptions {
    /// Apply the 3-tap Gaussian smoothing pass before binarization.
    pub blur: bool,
    /// Side of the square neighbourhood used for the adaptive mean (odd,
    /// `3..=MAX_BLOCK_SIZE`).
    pub block_size: usize,
    /// Offset subtracted from the local mean, in 8-bit intensity levels.
    pub threshold_offset: f32,
    /// The probe length is `page_width / probe_width_divisor` ...
    pub probe_width_divisor: usize,
    /// ... capped at this many pixels.
    pub max_probe_length_px: usize,
    /// Minimum accepted segment length in pixels. `None` uses half the probe
    /// length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_line_length_px: Option<usize>,
}

impl Default for ExtractorOptions {
    fn default() -> Self {
        Self {
            blur: true,
            block_size: 15,
            threshold_offset: 8.0,
            probe_width_divisor: 4,
            max_probe_length_px: 100,
            min_line_length_px: None,
        }
    }
}

impl ExtractorOptions {
    /// Length of the horizontal opening probe for a page of `width` pixels.
    pub fn probe_length(&self, width: usize) -> usize {
        (width / self.probe_width_divisor.max(1))
            .min(self.max_probe_length_px)
            .max(1)
    }

    /// Minimum segment length for a page of `width` pixels.
    pub fn min_length(&self, width: usize) -> usize {
        self.min_line_length_px
            .unwrap_or_else(|| self.probe_length(width) / 2)
            .max(1)
    }

    /// Threshold offset in normalised `[0, 1]` intensity units.
    pub fn offset_normalized(&self) -> f32 {
        self.threshold_offset / 255.0
    }

    pub fn validate(&self) -> Result<(), StaffError> {
        if self.block_size < 3 || self.block_size > MAX_BLOCK_SIZE || self.block_size % 2 == 0 {
            return Err(StaffError::configuration(format!(
                "block_size must be odd and within 3..={MAX_BLOCK_SIZE}, got {}",
                self.block_size
            )));
        }
        if !self.threshold_offset.is_finite() || self.threshold_offset < 0.0 {
            return Err(StaffError::configuration(format!(
                "threshold_offset must be finite and >= 0, got {}",
                self.threshold_offset
            )));
        }
        if self.probe_width_divisor == 0 {
            return Err(StaffError::configuration("probe_width_divisor must be >= 1"));
        }
        if self.max_probe_length_px == 0 {
            return Err(StaffError::configuration("max_probe_length_px must be >= 1"));
        }
        if self.min_line_length_px == Some(0) {
            return Err(StaffError::configuration("min_line_length_px must be >= 1"));
        }
        Ok(())
    }
}
