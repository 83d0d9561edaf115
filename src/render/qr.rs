use qrcode::{EcLevel, QrCode};

use crate::assets::color::Rgba8;
use crate::foundation::core::RasterImage;
use crate::foundation::error::{StempelError, StempelResult};

/// QR error-correction level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorCorrection {
    /// About 7% of codewords recoverable.
    Low,
    /// About 15%.
    Medium,
    /// About 25%.
    Quartile,
    /// About 30%. Watermarks use this so the covering stamp stays recoverable.
    #[default]
    High,
}

impl ErrorCorrection {
    fn ec_level(self) -> EcLevel {
        match self {
            Self::Low => EcLevel::L,
            Self::Medium => EcLevel::M,
            Self::Quartile => EcLevel::Q,
            Self::High => EcLevel::H,
        }
    }
}

/// Square QR module grid without a quiet zone. `true` is a dark module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrMatrix {
    width: usize,
    dark: Vec<bool>,
}

/// Encode `payload` as a QR symbol, picking the smallest version that fits.
pub fn encode_qr(payload: &str, level: ErrorCorrection) -> StempelResult<QrMatrix> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), level.ec_level())
        .map_err(|e| StempelError::qr_encoding(format!("{e} ({} bytes)", payload.len())))?;

    tracing::debug!(
        version = ?code.version(),
        level = ?level,
        modules = code.width(),
        "qr encoded"
    );

    let width = code.width();
    let dark = code
        .to_colors()
        .into_iter()
        .map(|c| c == qrcode::Color::Dark)
        .collect();
    Ok(QrMatrix { width, dark })
}

impl QrMatrix {
    /// Modules per side.
    pub fn width(&self) -> usize {
        self.width
    }

    /// `true` if the module at column `x`, row `y` is dark. Out of range reads as light.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.width {
            return false;
        }
        self.dark[y * self.width + x]
    }

    /// Render to a `size x size` raster with no quiet zone.
    ///
    /// Each pixel takes the module at `floor(p * width / size)` on both axes, so modules differ
    /// in size by at most one pixel when `size` is not a multiple of the width.
    pub fn rasterize(&self, size: u32, dark: Rgba8, light: Rgba8) -> StempelResult<RasterImage> {
        if size == 0 {
            return Err(StempelError::validation("qr raster size must be > 0"));
        }
        let size_usize = size as usize;
        let lookup: Vec<usize> = (0..size_usize)
            .map(|p| p * self.width / size_usize)
            .collect();

        let dark = dark.to_array();
        let light = light.to_array();
        let mut rgba8 = Vec::with_capacity(size_usize * size_usize * 4);
        for &my in &lookup {
            for &mx in &lookup {
                let px = if self.is_dark(mx, my) { dark } else { light };
                rgba8.extend_from_slice(&px);
            }
        }
        RasterImage::from_rgba8(size, size, rgba8)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/qr.rs"]
mod tests;
