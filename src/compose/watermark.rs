use crate::assets::color::Rgba8;
use crate::config::StampConfig;
use crate::foundation::core::{Point, RasterImage, Rect};
use crate::foundation::error::StempelResult;
use crate::render::qr::QrMatrix;
use crate::render::surface::Surface;

/// Lay a finished stamp over a full-canvas QR code.
///
/// The QR fills the canvas edge to edge. A white disc slightly larger than the scaled stamp clears
/// the center, and the stamp is drawn scaled into a centered square on top of it.
pub fn compose_watermark(
    config: &StampConfig,
    qr: &QrMatrix,
    stamp: &RasterImage,
) -> StempelResult<RasterImage> {
    let size = config.canvas_px;
    let side = f64::from(size);
    let full = Rect::new(0.0, 0.0, side, side);

    let mut surface = Surface::new(size, size)?;
    surface.fill_rect(full, Rgba8::WHITE);

    let qr_image = qr.rasterize(size, config.brand_color, Rgba8::WHITE)?;
    surface.draw_image(&qr_image, full)?;

    let stamp_side = f64::from(config.stamp_px());
    let offset = (side - stamp_side) / 2.0;
    surface.fill_circle(
        Point::new(side / 2.0, side / 2.0),
        stamp_side / 2.0 + config.disc_padding_px,
        Rgba8::WHITE,
    );
    surface.draw_image(
        stamp,
        Rect::new(offset, offset, offset + stamp_side, offset + stamp_side),
    )?;

    Ok(surface.finish())
}
