//! Owned 8-bit page raster as handed over by the rasterization collaborator.
//!
//! Pixels are interleaved in row-major order with 1 (gray), 3 (RGB) or 4
//! (RGBA) channels. Construction validates the geometry once so the
//! detection stages can index without further checks.

use super::ImageF32;
use crate::error::StaffError;
use crate::types::BoundingBox;
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};

/// ITU-R BT.601 luma weights (R, G, B).
const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl RasterImage {
    /// Wrap an interleaved buffer, rejecting empty or inconsistent geometry.
    pub fn new(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<u8>,
    ) -> Result<Self, StaffError> {
        if width == 0 || height == 0 {
            return Err(StaffError::input(format!(
                "zero-size raster ({width}x{height})"
            )));
        }
        if !matches!(channels, 1 | 3 | 4) {
            return Err(StaffError::input(format!(
                "unsupported channel count {channels}"
            )));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|px| px.checked_mul(channels))
            .ok_or_else(|| StaffError::input("raster dimensions overflow"))?;
        if data.len() != expected {
            return Err(StaffError::input(format!(
                "buffer holds {} bytes, {width}x{height}x{channels} needs {expected}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Single-channel raster from a gray buffer.
    pub fn from_gray(width: usize, height: usize, data: Vec<u8>) -> Result<Self, StaffError> {
        Self::new(width, height, 1, data)
    }

    /// Raster with every sample set to `value`.
    pub fn filled(
        width: usize,
        height: usize,
        channels: usize,
        value: u8,
    ) -> Result<Self, StaffError> {
        let len = width
            .checked_mul(height)
            .and_then(|px| px.checked_mul(channels))
            .filter(|&len| len <= isize::MAX as usize)
            .ok_or_else(|| StaffError::input("raster dimensions overflow"))?;
        Self::new(width, height, channels, vec![value; len])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Channel samples of the pixel at (x, y).
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let start = (y * self.width + x) * self.channels;
        &self.data[start..start + self.channels]
    }

    #[inline]
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [u8] {
        let start = (y * self.width + x) * self.channels;
        &mut self.data[start..start + self.channels]
    }

    /// Convert to a single-channel intensity plane in `[0, 1]`. Alpha is ignored.
    pub fn to_intensity(&self) -> ImageF32 {
        let mut out = ImageF32::new(self.width, self.height);
        for (dst, px) in out.data.iter_mut().zip(self.data.chunks_exact(self.channels)) {
            let luma = match self.channels {
                1 => px[0] as f32,
                _ => {
                    LUMA_WEIGHTS[0] * px[0] as f32
                        + LUMA_WEIGHTS[1] * px[1] as f32
                        + LUMA_WEIGHTS[2] * px[2] as f32
                }
            };
            *dst = luma / 255.0;
        }
        out
    }

    /// Copy the pixels inside `bbox`. The box must be non-empty and lie within
    /// the raster.
    pub fn crop(&self, bbox: &BoundingBox) -> Result<RasterImage, StaffError> {
        if bbox.is_empty() || bbox.x_max > self.width || bbox.y_max > self.height {
            return Err(StaffError::input(format!(
                "crop box {bbox:?} outside {}x{} raster",
                self.width, self.height
            )));
        }
        let row_len = bbox.width() * self.channels;
        let mut data = Vec::with_capacity(row_len * bbox.height());
        for y in bbox.y_min..bbox.y_max {
            let start = (y * self.width + bbox.x_min) * self.channels;
            data.extend_from_slice(&self.data[start..start + row_len]);
        }
        Ok(RasterImage {
            width: bbox.width(),
            height: bbox.height(),
            channels: self.channels,
            data,
        })
    }

    /// Expand to three channels, used as the canvas for overview rendering.
    pub fn to_rgb(&self) -> RasterImage {
        let data = match self.channels {
            3 => self.data.clone(),
            1 => self.data.iter().flat_map(|&v| [v, v, v]).collect(),
            _ => self
                .data
                .chunks_exact(self.channels)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect(),
        };
        RasterImage {
            width: self.width,
            height: self.height,
            channels: 3,
            data,
        }
    }

    /// Adopt a decoded image. Gray, RGB and RGBA layouts are kept as-is; other
    /// layouts are converted to 8-bit RGB.
    pub fn from_dynamic(image: DynamicImage) -> Result<Self, StaffError> {
        let (w, h) = (image.width() as usize, image.height() as usize);
        let channels = match &image {
            DynamicImage::ImageLuma8(_)
            | DynamicImage::ImageLumaA8(_)
            | DynamicImage::ImageLuma16(_)
            | DynamicImage::ImageLumaA16(_) => 1,
            DynamicImage::ImageRgba8(_) | DynamicImage::ImageRgba16(_) => 4,
            _ => 3,
        };
        let data = match channels {
            1 => image.into_luma8().into_raw(),
            4 => image.into_rgba8().into_raw(),
            _ => image.into_rgb8().into_raw(),
        };
        Self::new(w, h, channels, data)
    }

    /// Convert into an `image` crate buffer for encoding.
    pub fn to_dynamic(&self) -> DynamicImage {
        let (w, h) = (self.width as u32, self.height as u32);
        let data = self.data.clone();
        // Geometry was validated on construction, so the buffers always fit.
        match self.channels {
            1 => GrayImage::from_raw(w, h, data).map(DynamicImage::ImageLuma8),
            3 => RgbImage::from_raw(w, h, data).map(DynamicImage::ImageRgb8),
            _ => RgbaImage::from_raw(w, h, data).map(DynamicImage::ImageRgba8),
        }
        .unwrap_or_else(|| DynamicImage::new_rgb8(w, h))
    }
}
