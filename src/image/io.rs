//! I/O helpers for page rasters, masks and JSON.
//!
//! - `load_raster_image`: decode a PNG/JPEG page into a [`RasterImage`].
//! - `save_raster_image`: encode a raster (crop or overview) to disk.
//! - `save_mask`: write a binary mask as a black-on-white PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageView, Mask, RasterImage};
use crate::error::StaffError;
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk, keeping gray/RGB/RGBA layouts.
pub fn load_raster_image(path: &Path) -> Result<RasterImage, StaffError> {
    let img = image::open(path).map_err(|source| StaffError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    RasterImage::from_dynamic(img)
}

/// Save a raster, inferring the format from the file extension.
pub fn save_raster_image(image: &RasterImage, path: &Path) -> Result<(), StaffError> {
    ensure_parent_dir(path)?;
    image
        .to_dynamic()
        .save(path)
        .map_err(|source| StaffError::Image {
            path: path.to_path_buf(),
            source,
        })
}

/// Save a mask with ink drawn black on a white background.
pub fn save_mask(mask: &Mask, path: &Path) -> Result<(), StaffError> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(mask.w as u32, mask.h as u32);
    for (y, row) in mask.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            let v = if px != 0 { 0 } else { 255 };
            out.put_pixel(x as u32, y as u32, Luma([v]));
        }
    }
    out.save(path).map_err(|source| StaffError::Image {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), StaffError> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|e| StaffError::Io {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    fs::write(path, json).map_err(|source| StaffError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), StaffError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| StaffError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
