use serde::{Deserialize, Serialize};

/// Identifier assigned to a segment in extraction order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(pub u32);

/// Horizontal line segment `(x_start, y) → (x_end, y)`.
///
/// `x_end` is exclusive, so `length = x_end - x_start`. Both endpoints share
/// the same row by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct LineSegment {
    id: SegmentId,
    x_start: usize,
    x_end: usize,
    y: usize,
}

impl LineSegment {
    /// Build a segment; endpoints given in either order are normalised.
    pub fn new(id: SegmentId, x_start: usize, x_end: usize, y: usize) -> Self {
        Self {
            id,
            x_start: x_start.min(x_end),
            x_end: x_start.max(x_end),
            y,
        }
    }

    pub fn id(&self) -> SegmentId {
        self.id
    }

    pub fn x_start(&self) -> usize {
        self.x_start
    }

    pub fn x_end(&self) -> usize {
        self.x_end
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn length(&self) -> usize {
        self.x_end - self.x_start
    }

    /// Endpoints as `[x, y]` pairs.
    pub fn endpoints(&self) -> ([usize; 2], [usize; 2]) {
        ([self.x_start, self.y], [self.x_end, self.y])
    }
}
