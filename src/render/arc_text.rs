use crate::assets::color::Rgba8;
use crate::assets::font::{GlyphBrush, TextShaper};
use crate::foundation::core::{Affine, Point, Vec2};
use crate::geometry::arc::{AngleRange, ArcSpec, arc_progress, compute_angles, font_size_for_radius};
use crate::render::surface::{ShapedGlyph, Surface};

/// Where one character of arc text lands.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphPlacement {
    /// The character drawn in this slot.
    pub ch: char,
    /// Position along the run, `0` for the first slot and `1` for the last.
    pub progress: f64,
    /// Angle on the circle, in degrees.
    pub angle_deg: f64,
    /// Point on the effective circle the glyph is centered on.
    pub position: Point,
    /// Glyph rotation, in radians.
    pub rotation_rad: f64,
    /// Width and height of the glyph's line box.
    pub size: Vec2,
    /// Point in the line box placed on the arc: horizontal center, vertical middle of the em
    /// box (halfway between ascent and descent).
    pub anchor: Vec2,
    /// Full transform from glyph-local to surface coordinates.
    pub transform: Affine,
    pub(crate) glyphs: Vec<ShapedGlyph>,
}

/// Layout of a whole run of arc text, before anything is painted.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcTextPlan {
    /// Angular extent the run occupies.
    pub range: AngleRange,
    /// Font size every glyph is shaped at.
    pub font_size_px: f32,
    /// Measured advance of the whole string.
    pub text_width_px: f64,
    /// Radius glyph centers sit on.
    pub effective_radius: f64,
    /// One entry per Unicode scalar of the text, in order.
    pub placements: Vec<GlyphPlacement>,
}

/// Lay `spec.text()` out along its arc without drawing.
///
/// Characters are spread evenly in angle between the range ends regardless of their own width, so
/// narrow and wide letters get the same slot. A single character sits at the range midpoint.
pub fn plan_arc_text(shaper: &mut TextShaper, spec: &ArcSpec) -> ArcTextPlan {
    let font_size_px = font_size_for_radius(spec.radius()) as f32;
    let text_width_px = shaper.measure(spec.text(), font_size_px);
    let effective_radius = spec.effective_radius();
    let range = compute_angles(text_width_px, effective_radius, spec.is_bottom());

    let chars: Vec<char> = spec.text().chars().collect();
    let n = chars.len();
    let mut placements = Vec::with_capacity(n);
    let mut buf = [0u8; 4];
    for (i, &ch) in chars.iter().enumerate() {
        let progress = arc_progress(i, n);
        let angle_deg = if n == 1 {
            range.mid_deg()
        } else {
            range.at(progress)
        };

        let layout = shaper.layout_line(ch.encode_utf8(&mut buf), font_size_px);
        let size = Vec2::new(f64::from(layout.full_width()), f64::from(layout.height()));
        let (glyphs, middle_y) = shaped_glyphs(&layout);
        let anchor = Vec2::new(size.x * 0.5, middle_y.unwrap_or(size.y * 0.5));
        let glyphs = if ch.is_whitespace() {
            Vec::new()
        } else {
            glyphs
        };

        placements.push(GlyphPlacement {
            ch,
            progress,
            angle_deg,
            position: spec.point_at(angle_deg),
            rotation_rad: spec.glyph_rotation(angle_deg),
            size,
            anchor,
            transform: spec.glyph_transform(angle_deg, anchor),
            glyphs,
        });
    }

    ArcTextPlan {
        range,
        font_size_px,
        text_width_px,
        effective_radius,
        placements,
    }
}

/// Plan and paint `spec` onto `surface` in `color`.
///
/// Each glyph is drawn under its own transform. Empty text draws nothing.
pub fn draw_arc_text(surface: &mut Surface, shaper: &mut TextShaper, spec: &ArcSpec, color: Rgba8) {
    let plan = plan_arc_text(shaper, spec);
    let font = shaper.font().font_data();
    for p in &plan.placements {
        surface.fill_glyphs(font, plan.font_size_px, p.transform, color, &p.glyphs);
    }
}

/// Glyphs in line-box coordinates, plus the y of the first run's em-box middle.
fn shaped_glyphs(layout: &parley::Layout<GlyphBrush>) -> (Vec<ShapedGlyph>, Option<f64>) {
    let mut out = Vec::new();
    let mut middle_y = None;
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            if middle_y.is_none() {
                let m = run.run().metrics();
                middle_y = Some(f64::from(run.baseline() - (m.ascent - m.descent) * 0.5));
            }
            out.extend(run.positioned_glyphs().map(|g| ShapedGlyph {
                id: g.id,
                x: g.x,
                y: g.y,
            }));
        }
    }
    (out, middle_y)
}

#[cfg(test)]
#[path = "../../tests/unit/render/arc_text.rs"]
mod tests;
