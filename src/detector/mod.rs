//! Staff detector orchestrating extraction, grouping and cropping.
//!
//! Overview
//! - [`StaffDetector`] runs the three stages on one page raster:
//!   [`LineExtractor`](crate::segments::LineExtractor) →
//!   [`StaffClusterer`](crate::staff::StaffClusterer) →
//!   [`RegionCropper`](crate::staff::RegionCropper).
//! - [`process_document`] fans pages of a [`PageSource`](crate::source::PageSource)
//!   out over rayon, isolates per-page failures and reduces the results into
//!   a [`DocumentSummary`](crate::diagnostics::DocumentSummary).
//! - [`DocumentDetection::export`] forwards crops and overviews, keyed by
//!   [`RegionKey`](crate::types::RegionKey), to a
//!   [`RegionSink`](crate::export::RegionSink).
//!
//! Modules
//! - [`params`] – configuration types used by the detector and CLI.
//! - `pipeline` – the per-page [`StaffDetector`].
//! - `batch` – the multi-page orchestrator.

mod batch;
pub mod params;
mod pipeline;

pub use batch::{process_document, DocumentDetection, PageResult, ProcessedPage};
pub use params::{DocumentOptions, StaffParams};
pub use pipeline::{extract_staff_regions, PageDetection, StaffDetector};
