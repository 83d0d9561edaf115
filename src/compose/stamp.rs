use crate::assets::font::TextShaper;
use crate::config::StampConfig;
use crate::foundation::core::{Point, RasterImage, Rect};
use crate::foundation::error::StempelResult;
use crate::geometry::arc::ArcSpec;
use crate::render::arc_text::draw_arc_text;
use crate::render::surface::Surface;

/// Reverse `s` scalar by scalar.
///
/// Bottom arc text is laid out with increasing angle, which runs right to left on screen, so it is
/// reversed first to read left to right.
pub fn reverse_chars(s: &str) -> String {
    s.chars().rev().collect()
}

/// The two arcs of a stamp: `top` as given, `bottom` reversed. Both use the configured text radius
/// around the canvas center and no margin.
pub fn stamp_arc_specs(
    config: &StampConfig,
    top: &str,
    bottom: &str,
) -> StempelResult<(ArcSpec, ArcSpec)> {
    let half = f64::from(config.canvas_px) / 2.0;
    let center = Point::new(half, half);
    let radius = config.text_radius_px();
    let top = ArcSpec::new(top, center, radius, false, 0.0)?;
    let bottom = ArcSpec::new(reverse_chars(bottom), center, radius, true, 0.0)?;
    Ok((top, bottom))
}

/// Draw `seal` stretched over a square canvas, then both arcs in the brand color.
pub fn compose_stamp(
    config: &StampConfig,
    seal: &RasterImage,
    shaper: &mut TextShaper,
    top: &str,
    bottom: &str,
) -> StempelResult<RasterImage> {
    let size = config.canvas_px;
    let (top_spec, bottom_spec) = stamp_arc_specs(config, top, bottom)?;

    let mut surface = Surface::new(size, size)?;
    let side = f64::from(size);
    surface.draw_image(seal, Rect::new(0.0, 0.0, side, side))?;
    draw_arc_text(&mut surface, shaper, &top_spec, config.brand_color);
    draw_arc_text(&mut surface, shaper, &bottom_spec, config.brand_color);
    Ok(surface.finish())
}
