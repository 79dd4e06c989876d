//! Padded crops around detected staves.

use super::cluster::StaffGroup;
use crate::error::StaffError;
use crate::image::RasterImage;
use crate::types::BoundingBox;
use serde::{Deserialize, Serialize};

/// Padding in pixels added around a staff's tight bounding box.
///
/// The bottom margin is independent so more context below a staff (ledger
/// lines, lyrics) can be kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(30)
    }
}

impl Margins {
    pub const fn uniform(px: i32) -> Self {
        Self {
            left: px,
            right: px,
            top: px,
            bottom: px,
        }
    }

    pub fn validate(&self) -> Result<(), StaffError> {
        let sides = [
            ("left", self.left),
            ("right", self.right),
            ("top", self.top),
            ("bottom", self.bottom),
        ];
        for (side, value) in sides {
            if value < 0 {
                return Err(StaffError::configuration(format!(
                    "{side} margin must be >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Grow `bbox` by the margins and clip it to a `width × height` raster.
    pub fn expand_clipped(&self, bbox: &BoundingBox, width: usize, height: usize) -> BoundingBox {
        let grow = |v: usize, delta: i32, limit: usize| -> usize {
            (v as i64 + delta as i64).clamp(0, limit as i64) as usize
        };
        BoundingBox::new(
            grow(bbox.x_min, -self.left, width),
            grow(bbox.y_min, -self.top, height),
            grow(bbox.x_max, self.right, width),
            grow(bbox.y_max, self.bottom, height),
        )
    }
}

/// One staff cut out of its page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CroppedRegion {
    /// Padded, clipped box in page coordinates.
    pub bbox: BoundingBox,
    /// Number of lines in the source group.
    pub line_count: usize,
    pub image: RasterImage,
}

/// Cuts padded staff regions out of a page.
#[derive(Clone, Debug, Default)]
pub struct RegionCropper {
    margins: Margins,
}

impl RegionCropper {
    pub fn new(margins: Margins) -> Result<Self, StaffError> {
        margins.validate()?;
        Ok(Self { margins })
    }

    pub fn margins(&self) -> &Margins {
        &self.margins
    }

    /// Padded box of `group` clipped to `page`.
    pub fn region_box(&self, group: &StaffGroup, page: &RasterImage) -> BoundingBox {
        self.margins
            .expand_clipped(&group.bounds(), page.width(), page.height())
    }

    pub fn crop(&self, group: &StaffGroup, page: &RasterImage) -> Result<CroppedRegion, StaffError> {
        let bbox = self.region_box(group, page);
        let image = page.crop(&bbox)?;
        Ok(CroppedRegion {
            bbox,
            line_count: group.line_count(),
            image,
        })
    }
}
