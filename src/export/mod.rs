//! Storage collaborators for detected staves.
//!
//! The orchestrator decides *what* is produced (one crop per
//! [`RegionKey`](crate::types::RegionKey), one overview per page); a
//! [`RegionSink`] decides where it goes.

mod fs;
mod overview;

pub use fs::FsRegionSink;
pub use overview::{render_overview, OVERVIEW_PALETTE};

use crate::error::StaffError;
use crate::image::RasterImage;
use crate::staff::CroppedRegion;
use crate::types::RegionKey;
use serde::Serialize;

pub trait RegionSink {
    fn write_region(&mut self, key: RegionKey, region: &CroppedRegion) -> Result<(), StaffError>;

    fn write_overview(&mut self, page_index: usize, overview: &RasterImage) -> Result<(), StaffError>;
}

/// Counts reported by [`DocumentDetection::export`](crate::detector::DocumentDetection::export).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport {
    pub regions_written: usize,
    pub overviews_written: usize,
    pub failures: usize,
}
