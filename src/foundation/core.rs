use std::io::Cursor;

use anyhow::Context;

use crate::foundation::error::{StempelError, StempelResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Owned straight-alpha RGBA8 raster in row-major order.
///
/// Every compositor output is a `RasterImage`. Values are never mutated after being returned;
/// drawing happens on a [`crate::render::Surface`] that is finished into a new raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    rgba8: Vec<u8>,
}

impl RasterImage {
    /// Wrap raw RGBA8 bytes, checking that the length matches `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> StempelResult<Self> {
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if rgba8.len() != expected {
            return Err(StempelError::validation(format!(
                "raster byte len {} does not match {width}x{height}",
                rgba8.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8,
        })
    }

    /// Raster of `width x height` filled with one straight-alpha pixel.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let n = (width as usize) * (height as usize);
        let mut rgba8 = Vec::with_capacity(n * 4);
        for _ in 0..n {
            rgba8.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            rgba8,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major straight-alpha RGBA8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.rgba8
    }

    /// Consume the raster and return its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.rgba8
    }

    /// Pixel at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.rgba8[i..i + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Encode as a lossless PNG.
    pub fn to_png(&self) -> StempelResult<Vec<u8>> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.rgba8.clone())
            .context("raster dimensions do not match buffer")?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode png")?;
        Ok(buf)
    }

    /// Decode any image format supported by the `image` crate into RGBA8.
    pub fn from_png(bytes: &[u8]) -> StempelResult<Self> {
        crate::assets::decode::decode_image(bytes)
    }

    /// Caller guarantees `rgba8.len() == width * height * 4`.
    pub(crate) fn from_parts(width: u32, height: u32, rgba8: Vec<u8>) -> Self {
        debug_assert_eq!(rgba8.len(), (width as usize) * (height as usize) * 4);
        Self {
            width,
            height,
            rgba8,
        }
    }

    pub(crate) fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            rgba8: img.into_raw(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
