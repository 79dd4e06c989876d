//! Staff grouping and cropping (the second and third detection stages).

pub mod cluster;
pub mod crop;

pub use cluster::{cluster_staff_lines, ClusterOptions, StaffClusterer, StaffGroup};
pub use crop::{CroppedRegion, Margins, RegionCropper};
