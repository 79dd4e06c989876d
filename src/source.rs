//! Page sources: where the orchestrator obtains page rasters.
//!
//! Rendering documents (e.g. PDF) to rasters is left to the caller; a source
//! only hands out already rasterized pages by index.

use crate::error::StaffError;
use crate::image::io::load_raster_image;
use crate::image::RasterImage;
use std::path::PathBuf;

/// Provider of page rasters. Pages may be requested concurrently.
pub trait PageSource: Sync {
    fn page_count(&self) -> usize;

    /// Produce the raster for page `index` (zero-based).
    fn load_page(&self, index: usize) -> Result<RasterImage, StaffError>;
}

impl PageSource for [RasterImage] {
    fn page_count(&self) -> usize {
        self.len()
    }

    fn load_page(&self, index: usize) -> Result<RasterImage, StaffError> {
        self.get(index).cloned().ok_or_else(|| out_of_range(index, self.len()))
    }
}

impl PageSource for Vec<RasterImage> {
    fn page_count(&self) -> usize {
        self.as_slice().page_count()
    }

    fn load_page(&self, index: usize) -> Result<RasterImage, StaffError> {
        self.as_slice().load_page(index)
    }
}

/// One image file per page, decoded on demand.
#[derive(Clone, Debug)]
pub struct ImageFileSource {
    paths: Vec<PathBuf>,
}

impl ImageFileSource {
    pub fn new(paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl PageSource for ImageFileSource {
    fn page_count(&self) -> usize {
        self.paths.len()
    }

    fn load_page(&self, index: usize) -> Result<RasterImage, StaffError> {
        let path = self
            .paths
            .get(index)
            .ok_or_else(|| out_of_range(index, self.paths.len()))?;
        load_raster_image(path).map_err(|e| StaffError::PageSource {
            index,
            message: e.to_string(),
        })
    }
}

fn out_of_range(index: usize, count: usize) -> StaffError {
    StaffError::PageSource {
        index,
        message: format!("document has {count} pages"),
    }
}
