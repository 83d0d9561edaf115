use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::assets::decode::decode_image;
use crate::foundation::core::RasterImage;
use crate::foundation::error::{StempelError, StempelResult};

/// Width the base seal artwork is normalized to before compositing.
pub const DEFAULT_SEAL_WIDTH_PX: u32 = 300;

/// Load the base seal artwork and normalize it to `width_px` wide.
///
/// The aspect ratio is preserved (smaller sources are upscaled), and the result goes through a
/// lossless PNG re-encode so every caller sees the same decoded pixels. Read and decode failures
/// are reported as [`StempelError::AssetUnreadable`]; there is no fallback seal.
pub fn load_base_seal(path: impl AsRef<Path>, width_px: u32) -> StempelResult<RasterImage> {
    let path = path.as_ref();
    if width_px == 0 {
        return Err(StempelError::validation("seal width must be > 0"));
    }

    let bytes =
        std::fs::read(path).map_err(|e| StempelError::asset_unreadable(path, e.to_string()))?;
    let decoded = image::load_from_memory(&bytes)
        .map_err(|e| StempelError::asset_unreadable(path, e.to_string()))?;

    let resized = resize_to_width(&decoded.to_rgba8(), width_px);
    let png = RasterImage::from_rgba_image(resized).to_png()?;
    decode_image(&png).map_err(|e| StempelError::asset_unreadable(path, e.to_string()))
}

fn resize_to_width(src: &image::RgbaImage, width_px: u32) -> image::RgbaImage {
    let (w, h) = src.dimensions();
    let height_px = ((f64::from(h) * f64::from(width_px)) / f64::from(w))
        .round()
        .max(1.0) as u32;
    if (w, h) == (width_px, height_px) {
        return src.clone();
    }
    image::imageops::resize(
        src,
        width_px,
        height_px,
        image::imageops::FilterType::Lanczos3,
    )
}

/// Populate-once, read-only cache of the normalized base seal.
///
/// Failed loads are not cached, so a later call retries the read.
#[derive(Debug)]
pub struct SealCache {
    path: PathBuf,
    width_px: u32,
    slot: Mutex<Option<Arc<RasterImage>>>,
}

impl SealCache {
    /// Cache for the seal at `path`, normalized to `width_px`.
    pub fn new(path: impl Into<PathBuf>, width_px: u32) -> Self {
        Self {
            path: path.into(),
            width_px,
            slot: Mutex::new(None),
        }
    }

    /// Configured seal path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return `true` once a load has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Return the cached seal, loading it on first use.
    pub fn get_or_load(&self) -> StempelResult<Arc<RasterImage>> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(seal) = slot.as_ref() {
            return Ok(Arc::clone(seal));
        }

        let seal = Arc::new(load_base_seal(&self.path, self.width_px)?);
        tracing::debug!(
            path = %self.path.display(),
            width = seal.width(),
            height = seal.height(),
            "base seal cached"
        );
        *slot = Some(Arc::clone(&seal));
        Ok(seal)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/seal.rs"]
mod tests;
