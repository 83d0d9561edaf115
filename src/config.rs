use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assets::color::Rgba8;
use crate::assets::font::FontSource;
use crate::assets::seal::DEFAULT_SEAL_WIDTH_PX;
use crate::foundation::error::{StempelError, StempelResult};

/// Everything a [`crate::Stamper`] needs besides the per-request texts.
///
/// Every field has a default, so a JSON config only lists what it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StampConfig {
    /// Base seal artwork.
    pub seal_path: PathBuf,
    /// Bold face used for arc text.
    pub font: FontSource,
    /// Side of the square stamp and watermark canvases, in pixels.
    pub canvas_px: u32,
    /// Width the seal artwork is normalized to before it is stretched over the canvas.
    pub seal_width_px: u32,
    /// Arc-text radius as a fraction of `canvas_px`.
    pub text_radius_ratio: f64,
    /// Arc text and QR dark-module color.
    pub brand_color: Rgba8,
    /// Stamp side inside a watermark as a fraction of `canvas_px`.
    pub stamp_ratio: f64,
    /// How far the white disc behind the watermark stamp extends past the stamp's radius.
    pub disc_padding_px: f64,
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            seal_path: PathBuf::from("assets/images/clean_stamp.png"),
            font: FontSource::default(),
            canvas_px: 600,
            seal_width_px: DEFAULT_SEAL_WIDTH_PX,
            text_radius_ratio: 0.38,
            brand_color: Rgba8::BRAND_BLUE,
            stamp_ratio: 0.45,
            disc_padding_px: 10.0,
        }
    }
}

impl StampConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> StempelResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| StempelError::validation(format!("parse stamp config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> StempelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StempelError::validation(format!("open stamp config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Replace the seal artwork path.
    pub fn with_seal_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.seal_path = path.into();
        self
    }

    /// Replace the font source.
    pub fn with_font(mut self, font: FontSource) -> Self {
        self.font = font;
        self
    }

    /// Replace the canvas size.
    pub fn with_canvas_px(mut self, px: u32) -> Self {
        self.canvas_px = px;
        self
    }

    /// Replace the brand color.
    pub fn with_brand_color(mut self, color: Rgba8) -> Self {
        self.brand_color = color;
        self
    }

    /// Check sizes and ratios.
    pub fn validate(&self) -> StempelResult<()> {
        if self.canvas_px == 0 || self.canvas_px > u32::from(u16::MAX) {
            return Err(StempelError::validation(format!(
                "canvas_px must be in 1..={}, got {}",
                u16::MAX,
                self.canvas_px
            )));
        }
        if self.seal_width_px == 0 {
            return Err(StempelError::validation("seal_width_px must be > 0"));
        }
        for (name, v) in [
            ("text_radius_ratio", self.text_radius_ratio),
            ("stamp_ratio", self.stamp_ratio),
        ] {
            if !(v.is_finite() && v > 0.0 && v <= 1.0) {
                return Err(StempelError::validation(format!(
                    "{name} must be in (0, 1], got {v}"
                )));
            }
        }
        if !(self.disc_padding_px.is_finite() && self.disc_padding_px >= 0.0) {
            return Err(StempelError::validation("disc_padding_px must be >= 0"));
        }
        if self.stamp_px() == 0 {
            return Err(StempelError::validation(
                "stamp_ratio leaves no pixels for the watermark stamp",
            ));
        }
        Ok(())
    }

    /// Arc-text radius in pixels.
    pub fn text_radius_px(&self) -> f64 {
        f64::from(self.canvas_px) * self.text_radius_ratio
    }

    /// Side of the scaled stamp inside a watermark, in pixels.
    pub fn stamp_px(&self) -> u32 {
        (f64::from(self.canvas_px) * self.stamp_ratio).round() as u32
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
