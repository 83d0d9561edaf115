use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::assets::font::{BoldFont, TextShaper};
use crate::assets::seal::SealCache;
use crate::compose::request::{DocumentStampRequest, StampRequest, WatermarkRequest};
use crate::compose::stamp::compose_stamp;
use crate::compose::watermark::compose_watermark;
use crate::config::StampConfig;
use crate::foundation::core::RasterImage;
use crate::foundation::error::StempelResult;
use crate::render::qr::{ErrorCorrection, encode_qr};

/// Entry point for stamp and watermark generation.
///
/// Holds the validated config, the resolved bold font and a lazily populated seal cache. A
/// `Stamper` is `Send + Sync`; share it behind an `Arc` and call it from many threads at once.
#[derive(Debug)]
pub struct Stamper {
    config: StampConfig,
    font: BoldFont,
    seal: SealCache,
}

impl Stamper {
    /// Validate `config` and resolve its font. The seal is read on first use.
    pub fn new(config: StampConfig) -> StempelResult<Self> {
        config.validate()?;
        let font = BoldFont::load(&config.font)?;
        Self::with_font(config, font)
    }

    /// Like [`Stamper::new`] with an already resolved font; `config.font` is ignored.
    pub fn with_font(config: StampConfig, font: BoldFont) -> StempelResult<Self> {
        config.validate()?;
        tracing::debug!(
            family = font.family_name(),
            seal = %config.seal_path.display(),
            canvas = config.canvas_px,
            "stamper ready"
        );
        let seal = SealCache::new(config.seal_path.clone(), config.seal_width_px);
        Ok(Self { config, font, seal })
    }

    /// Active configuration.
    pub fn config(&self) -> &StampConfig {
        &self.config
    }

    /// Font arc text is drawn with.
    pub fn font(&self) -> &BoldFont {
        &self.font
    }

    /// Render the seal with `top` and `bottom` along its arcs.
    #[tracing::instrument(skip(self))]
    pub fn generate_stamp(&self, top: &str, bottom: &str) -> StempelResult<RasterImage> {
        let seal = self.seal.get_or_load()?;
        let mut shaper = TextShaper::new(&self.font)?;
        compose_stamp(&self.config, &seal, &mut shaper, top, bottom)
    }

    /// Render a QR code for `payload` with the stamp centered over it.
    ///
    /// The QR is encoded first, so an oversized payload fails before any drawing.
    #[tracing::instrument(skip(self))]
    pub fn generate_watermark(
        &self,
        payload: &str,
        top: &str,
        bottom: &str,
    ) -> StempelResult<RasterImage> {
        let qr = encode_qr(payload, ErrorCorrection::High)?;
        let stamp = self.generate_stamp(top, bottom)?;
        compose_watermark(&self.config, &qr, &stamp)
    }

    /// [`Stamper::generate_stamp`] encoded as PNG.
    pub fn generate_stamp_png(&self, top: &str, bottom: &str) -> StempelResult<Vec<u8>> {
        self.generate_stamp(top, bottom)?.to_png()
    }

    /// [`Stamper::generate_watermark`] encoded as PNG.
    pub fn generate_watermark_png(
        &self,
        payload: &str,
        top: &str,
        bottom: &str,
    ) -> StempelResult<Vec<u8>> {
        self.generate_watermark(payload, top, bottom)?.to_png()
    }

    /// [`Stamper::generate_watermark_png`] as standard base64, ready to inline into a template.
    pub fn generate_watermark_base64(
        &self,
        payload: &str,
        top: &str,
        bottom: &str,
    ) -> StempelResult<String> {
        let png = self.generate_watermark_png(payload, top, bottom)?;
        Ok(BASE64.encode(png))
    }

    /// Render a [`StampRequest`].
    pub fn render_stamp(&self, req: &StampRequest) -> StempelResult<RasterImage> {
        self.generate_stamp(&req.top_text, &req.bottom_text)
    }

    /// Render a [`WatermarkRequest`].
    pub fn render_watermark(&self, req: &WatermarkRequest) -> StempelResult<RasterImage> {
        self.generate_watermark(&req.qr_payload, &req.top_text, &req.bottom_text)
    }

    /// Render the watermark for an issued letter.
    pub fn render_document(&self, req: &DocumentStampRequest) -> StempelResult<RasterImage> {
        self.render_watermark(&req.to_watermark_request()?)
    }
}
