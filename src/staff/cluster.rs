//! Grouping of line segments into staff systems.
//!
//! Segments are sorted top to bottom and chained in one pass: a segment joins
//! the open group when its row is within `tolerance_px` of the row of the
//! segment immediately before it in sorted order. Comparing against the
//! previous neighbour (not the group's first line or mean) tolerates the
//! uneven line spacing of skewed scans. The flip side is that a dense ladder
//! of unrelated segments, each close to the next, chains two staves into one
//! group even though its ends are far apart.

use crate::error::StaffError;
use crate::segments::LineSegment;
use crate::types::BoundingBox;
use log::debug;
use serde::{Deserialize, Serialize};
use std::mem;

/// Options controlling staff grouping.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterOptions {
    /// Largest vertical gap (pixels) between consecutive lines of one staff.
    /// A gap equal to the tolerance still joins.
    pub tolerance_px: f32,
    /// Groups with fewer lines are discarded.
    pub min_lines_per_group: usize,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            tolerance_px: 30.0,
            min_lines_per_group: 3,
        }
    }
}

impl ClusterOptions {
    pub fn validate(&self) -> Result<(), StaffError> {
        if !self.tolerance_px.is_finite() || self.tolerance_px <= 0.0 {
            return Err(StaffError::configuration(format!(
                "tolerance_px must be finite and > 0, got {}",
                self.tolerance_px
            )));
        }
        if self.min_lines_per_group < 1 {
            return Err(StaffError::configuration("min_lines_per_group must be >= 1"));
        }
        Ok(())
    }

    #[inline]
    fn joins(&self, prev: &LineSegment, next: &LineSegment) -> bool {
        (next.y().abs_diff(prev.y()) as f32) <= self.tolerance_px
    }
}

/// Segments believed to form one staff, ordered top to bottom.
///
/// Never empty, and holds at least `min_lines_per_group` members of the
/// options it was clustered with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StaffGroup {
    members: Vec<LineSegment>,
}

impl StaffGroup {
    pub fn members(&self) -> &[LineSegment] {
        &self.members
    }

    pub fn line_count(&self) -> usize {
        self.members.len()
    }

    /// Row of the topmost member.
    pub fn top(&self) -> usize {
        self.members[0].y()
    }

    /// Row of the bottommost member.
    pub fn bottom(&self) -> usize {
        self.members[self.members.len() - 1].y()
    }

    /// Tight box around all members, covering rows `top()..=bottom()`.
    pub fn bounds(&self) -> BoundingBox {
        let x_min = self.members.iter().map(|s| s.x_start()).min().unwrap_or(0);
        let x_max = self.members.iter().map(|s| s.x_end()).max().unwrap_or(0);
        BoundingBox::new(x_min, self.top(), x_max, self.bottom() + 1)
    }
}

/// Fold state: closed groups plus the single open accumulator.
#[derive(Default)]
struct Chain {
    closed: Vec<StaffGroup>,
    open: Vec<LineSegment>,
    discarded: usize,
}

impl Chain {
    fn step(mut self, seg: LineSegment, options: &ClusterOptions) -> Self {
        let joins = self
            .open
            .last()
            .is_some_and(|prev| options.joins(prev, &seg));
        if !joins {
            self.close(options);
        }
        self.open.push(seg);
        self
    }

    fn close(&mut self, options: &ClusterOptions) {
        let members = mem::take(&mut self.open);
        if members.len() >= options.min_lines_per_group {
            self.closed.push(StaffGroup { members });
        } else if !members.is_empty() {
            self.discarded += 1;
        }
    }

    /// Terminal step: the open group is flushed under the same keep rule.
    fn finish(mut self, options: &ClusterOptions) -> (Vec<StaffGroup>, usize) {
        self.close(options);
        (self.closed, self.discarded)
    }
}

/// Groups segments into staves.
#[derive(Clone, Debug, Default)]
pub struct StaffClusterer {
    options: ClusterOptions,
}

impl StaffClusterer {
    pub fn new(options: ClusterOptions) -> Result<Self, StaffError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &ClusterOptions {
        &self.options
    }

    /// Cluster `segments` into groups ordered by ascending row.
    pub fn cluster(&self, segments: &[LineSegment]) -> Vec<StaffGroup> {
        let mut sorted = segments.to_vec();
        sorted.sort_by_key(|s| (s.y(), s.x_start(), s.x_end()));
        let (groups, discarded) = sorted
            .into_iter()
            .fold(Chain::default(), |chain, seg| chain.step(seg, &self.options))
            .finish(&self.options);
        debug!(
            "StaffClusterer: segments={} groups={} discarded_candidates={}",
            segments.len(),
            groups.len(),
            discarded
        );
        groups
    }
}

/// Validate `options` and cluster once.
pub fn cluster_staff_lines(
    segments: &[LineSegment],
    options: ClusterOptions,
) -> Result<Vec<StaffGroup>, StaffError> {
    Ok(StaffClusterer::new(options)?.cluster(segments))
}
