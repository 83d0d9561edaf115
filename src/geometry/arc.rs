use crate::foundation::core::{Affine, Point, Vec2};
use crate::foundation::error::{StempelError, StempelResult};

/// Widest arc any single text run may occupy, in degrees.
pub const MAX_ARC_DEG: f64 = 140.0;

/// Extra angular room given to measured text before clamping.
pub const ARC_SLACK: f64 = 1.1;

/// Largest arc-text font size in pixels.
pub const MAX_FONT_PX: f64 = 36.0;

/// Angle (degrees, clockwise from +x on screen) where bottom text is centered.
pub const BOTTOM_ANCHOR_DEG: f64 = 90.0;

/// Angle (degrees, clockwise from +x on screen) where top text is centered.
pub const TOP_ANCHOR_DEG: f64 = 270.0;

/// Angular extent of a run of arc text.
///
/// Degrees with 0 on the positive x-axis, increasing clockwise on screen (y down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleRange {
    /// Angle of the first glyph.
    pub start_deg: f64,
    /// Angle of the last glyph.
    pub end_deg: f64,
}

impl AngleRange {
    /// `end_deg - start_deg`.
    pub fn span_deg(self) -> f64 {
        self.end_deg - self.start_deg
    }

    /// Midpoint of the range.
    pub fn mid_deg(self) -> f64 {
        (self.start_deg + self.end_deg) * 0.5
    }

    /// Angle at `progress` in `[0, 1]`, linearly interpolated.
    pub fn at(self, progress: f64) -> f64 {
        self.start_deg + self.span_deg() * progress
    }
}

/// Compute where text of `text_width_px` sits on a circle of `radius`.
///
/// The text's share of the circumference is widened by [`ARC_SLACK`] and then clamped to
/// [`MAX_ARC_DEG`]; text wider than the clamp gets squeezed and its glyphs overlap. The result is
/// centered on [`BOTTOM_ANCHOR_DEG`] or [`TOP_ANCHOR_DEG`].
pub fn compute_angles(text_width_px: f64, radius: f64, is_bottom: bool) -> AngleRange {
    let width = if text_width_px.is_finite() {
        text_width_px.max(0.0)
    } else {
        0.0
    };

    let circumference = 2.0 * std::f64::consts::PI * radius;
    let range_rad = if circumference > 0.0 && circumference.is_finite() {
        (width / circumference) * (2.0 * std::f64::consts::PI)
    } else {
        0.0
    };
    let range_deg = (range_rad.to_degrees() * ARC_SLACK).min(MAX_ARC_DEG);

    let anchor = if is_bottom {
        BOTTOM_ANCHOR_DEG
    } else {
        TOP_ANCHOR_DEG
    };
    AngleRange {
        start_deg: anchor - range_deg / 2.0,
        end_deg: anchor + range_deg / 2.0,
    }
}

/// Arc-text font size for a circle of `radius`: 20% of the radius, at most [`MAX_FONT_PX`].
pub fn font_size_for_radius(radius: f64) -> f64 {
    (radius * 0.2).min(MAX_FONT_PX)
}

/// Position of glyph `index` out of `count` along the arc, in `[0, 1]`.
///
/// A single glyph gets `0`.
pub fn arc_progress(index: usize, count: usize) -> f64 {
    index as f64 / count.saturating_sub(1).max(1) as f64
}

/// A request to lay `text` out along a circle.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcSpec {
    text: String,
    center: Point,
    radius: f64,
    is_bottom: bool,
    margin: f64,
}

impl ArcSpec {
    /// Validated arc request. Requires finite values with `radius > margin >= 0`.
    ///
    /// Empty text is allowed and draws nothing.
    pub fn new(
        text: impl Into<String>,
        center: Point,
        radius: f64,
        is_bottom: bool,
        margin: f64,
    ) -> StempelResult<Self> {
        if !(center.x.is_finite() && center.y.is_finite()) {
            return Err(StempelError::validation("arc center must be finite"));
        }
        if !radius.is_finite() || !margin.is_finite() {
            return Err(StempelError::validation(
                "arc radius and margin must be finite",
            ));
        }
        if margin < 0.0 {
            return Err(StempelError::validation("arc margin must be >= 0"));
        }
        if radius <= margin {
            return Err(StempelError::validation("arc radius must exceed margin"));
        }
        Ok(Self {
            text: text.into(),
            center,
            radius,
            is_bottom,
            margin,
        })
    }

    /// Text to lay out.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Circle center.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Nominal radius; also drives the font size.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// `true` for text centered at the bottom of the circle.
    pub fn is_bottom(&self) -> bool {
        self.is_bottom
    }

    /// Inset from the nominal radius.
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Radius glyph centers sit on: `radius - margin`.
    pub fn effective_radius(&self) -> f64 {
        self.radius - self.margin
    }

    /// Point on the effective circle at `angle_deg`.
    pub fn point_at(&self, angle_deg: f64) -> Point {
        let a = angle_deg.to_radians();
        self.center + self.effective_radius() * Vec2::new(a.cos(), a.sin())
    }

    /// Glyph rotation at `angle_deg`, in radians, so the baseline is tangent to the circle and
    /// reads along increasing angle for top text (decreasing for bottom text).
    pub fn glyph_rotation(&self, angle_deg: f64) -> f64 {
        let a = angle_deg.to_radians();
        if self.is_bottom {
            a - std::f64::consts::FRAC_PI_2
        } else {
            a + std::f64::consts::FRAC_PI_2
        }
    }

    /// Transform from glyph-local coordinates that puts the local point `anchor` on the arc at
    /// `angle_deg`, rotated with [`ArcSpec::glyph_rotation`].
    pub fn glyph_transform(&self, angle_deg: f64, anchor: Vec2) -> Affine {
        let p = self.point_at(angle_deg);
        Affine::translate(p.to_vec2())
            * Affine::rotate(self.glyph_rotation(angle_deg))
            * Affine::translate(-anchor)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/arc.rs"]
mod tests;
