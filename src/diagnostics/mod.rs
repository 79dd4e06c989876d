//! Diagnostics data model: stage timings and serializable run summaries.

pub mod summary;
pub mod timing;

pub use summary::{DocumentSummary, PageSummary, RegionSummary};
pub use timing::{StageTiming, TimingBreakdown};
