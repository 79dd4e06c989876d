//! Parameter types configuring the detector stages.
//!
//! All lengths are pixels at the resolution of the page raster. The defaults
//! match pages rendered at about 200 DPI; scale the pixel values with the
//! rendering resolution.

use crate::error::StaffError;
use crate::segments::ExtractorOptions;
use crate::staff::{ClusterOptions, Margins};
use serde::{Deserialize, Serialize};

/// Per-page pipeline parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaffParams {
    pub extractor: ExtractorOptions,
    pub clustering: ClusterOptions,
    pub margins: Margins,
}

impl StaffParams {
    pub fn validate(&self) -> Result<(), StaffError> {
        self.extractor.validate()?;
        self.clustering.validate()?;
        self.margins.validate()
    }
}

/// Document-level options for the batch orchestrator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentOptions {
    /// Process at most this many pages from the start of the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<usize>,
    /// Process pages on the rayon thread pool.
    pub parallel: bool,
    /// Render an annotated overview per page (one colour per staff).
    pub render_overview: bool,
    /// Keep the opened line mask of every page.
    pub keep_line_masks: bool,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            max_pages: None,
            parallel: true,
            render_overview: true,
            keep_line_masks: false,
        }
    }
}
