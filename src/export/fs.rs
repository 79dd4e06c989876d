use super::RegionSink;
use crate::error::StaffError;
use crate::image::io::save_raster_image;
use crate::image::RasterImage;
use crate::staff::CroppedRegion;
use crate::types::RegionKey;
use log::debug;
use std::path::{Path, PathBuf};

/// Writes crops and overviews as PNG files into one directory.
///
/// File names use one-based page and staff numbers:
/// `{stem}_page_{p}_staff_{g}.png` and `{stem}_page_{p}_overview.png`.
#[derive(Clone, Debug)]
pub struct FsRegionSink {
    dir: PathBuf,
    stem: String,
    written: Vec<PathBuf>,
}

impl FsRegionSink {
    pub fn new(dir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            stem: stem.into(),
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn region_path(&self, key: RegionKey) -> PathBuf {
        self.dir.join(format!(
            "{}_page_{}_staff_{}.png",
            self.stem,
            key.page_index + 1,
            key.group_index + 1
        ))
    }

    pub fn overview_path(&self, page_index: usize) -> PathBuf {
        self.dir
            .join(format!("{}_page_{}_overview.png", self.stem, page_index + 1))
    }

    /// Files written so far, in write order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn save(&mut self, image: &RasterImage, path: PathBuf) -> Result<(), StaffError> {
        save_raster_image(image, &path)?;
        debug!("FsRegionSink: wrote {}", path.display());
        self.written.push(path);
        Ok(())
    }
}

impl RegionSink for FsRegionSink {
    fn write_region(&mut self, key: RegionKey, region: &CroppedRegion) -> Result<(), StaffError> {
        let path = self.region_path(key);
        self.save(&region.image, path)
    }

    fn write_overview(&mut self, page_index: usize, overview: &RasterImage) -> Result<(), StaffError> {
        let path = self.overview_path(page_index);
        self.save(overview, path)
    }
}
