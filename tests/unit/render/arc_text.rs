use super::*;
use crate::assets::font::{BoldFont, FontSource};
use crate::foundation::core::RasterImage;

fn shaper() -> Option<TextShaper> {
    match BoldFont::load(&FontSource::default()) {
        Ok(font) => Some(TextShaper::new(&font).unwrap()),
        Err(e) => {
            eprintln!("skipping: no bold sans font installed ({e})");
            None
        }
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn spec(text: &str, is_bottom: bool) -> ArcSpec {
    ArcSpec::new(text, Point::new(300.0, 300.0), 228.0, is_bottom, 0.0).unwrap()
}

#[test]
fn one_placement_per_scalar_spanning_the_range() {
    let Some(mut shaper) = shaper() else { return };
    let plan = plan_arc_text(&mut shaper, &spec("PENGURUS PUSAT", false));

    assert_eq!(plan.placements.len(), 14);
    assert_eq!(plan.font_size_px, 36.0);
    assert!(plan.text_width_px > 0.0);

    let first = &plan.placements[0];
    let last = &plan.placements[13];
    assert_eq!(first.ch, 'P');
    assert_eq!(last.ch, 'T');
    assert_eq!(first.progress, 0.0);
    assert_eq!(last.progress, 1.0);
    assert!(approx(first.angle_deg, plan.range.start_deg));
    assert!(approx(last.angle_deg, plan.range.end_deg));
    assert!(approx(plan.range.mid_deg(), 270.0));

    for w in plan.placements.windows(2) {
        assert!(w[1].angle_deg > w[0].angle_deg);
    }
}

#[test]
fn space_occupies_a_slot_without_glyphs() {
    let Some(mut shaper) = shaper() else { return };
    let plan = plan_arc_text(&mut shaper, &spec("A B", true));
    assert_eq!(plan.placements.len(), 3);
    assert!(!plan.placements[0].glyphs.is_empty());
    assert!(plan.placements[1].glyphs.is_empty());
    assert!(approx(plan.placements[1].angle_deg, 90.0));
}

#[test]
fn single_char_sits_at_the_anchor() {
    let Some(mut shaper) = shaper() else { return };
    for (is_bottom, anchor) in [(true, 90.0), (false, 270.0)] {
        let plan = plan_arc_text(&mut shaper, &spec("X", is_bottom));
        assert_eq!(plan.placements.len(), 1);
        let p = &plan.placements[0];
        assert!(approx(p.angle_deg, anchor));
        assert!(approx(plan.range.mid_deg(), anchor));
    }
}

#[test]
fn positions_lie_on_the_effective_circle() {
    let Some(mut shaper) = shaper() else { return };
    let s = ArcSpec::new("JAKARTA", Point::new(300.0, 300.0), 228.0, true, 20.0).unwrap();
    let plan = plan_arc_text(&mut shaper, &s);
    assert!(approx(plan.effective_radius, 208.0));
    for p in &plan.placements {
        let d = (p.position - Point::new(300.0, 300.0)).hypot();
        assert!(approx(d, 208.0), "distance {d}");
        // Bottom glyphs lie below the center.
        assert!(p.position.y > 300.0);
        // The anchor maps onto the arc point and sits mid-box horizontally.
        let c = p.transform * p.anchor.to_point();
        assert!((c - p.position).hypot() < 1e-6);
        assert!(approx(p.anchor.x, p.size.x * 0.5));
        assert!(p.anchor.y > 0.0 && p.anchor.y < p.size.y);
    }
}

#[test]
fn empty_text_plans_and_draws_nothing() {
    let Some(mut shaper) = shaper() else { return };
    let s = spec("", false);
    let plan = plan_arc_text(&mut shaper, &s);
    assert!(plan.placements.is_empty());
    assert_eq!(plan.text_width_px, 0.0);

    let mut surface = Surface::new(64, 64).unwrap();
    let s = ArcSpec::new("", Point::new(32.0, 32.0), 20.0, false, 0.0).unwrap();
    draw_arc_text(&mut surface, &mut shaper, &s, Rgba8::BRAND_BLUE);
    assert!(surface.finish().as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn drawing_paints_near_the_arc() {
    let Some(mut shaper) = shaper() else { return };
    let mut surface = Surface::new(200, 200).unwrap();
    let s = ArcSpec::new("OOOO", Point::new(100.0, 100.0), 80.0, false, 0.0).unwrap();
    draw_arc_text(&mut surface, &mut shaper, &s, Rgba8::BRAND_BLUE);
    let out = surface.finish();

    let mut inked_top = 0;
    let mut inked_bottom = 0;
    for y in 0..200 {
        for x in 0..200 {
            if out.pixel(x, y).unwrap()[3] > 128 {
                if y < 100 {
                    inked_top += 1;
                } else {
                    inked_bottom += 1;
                }
            }
        }
    }
    assert!(inked_top > 20, "top arc ink {inked_top}");
    assert_eq!(inked_bottom, 0);
}

/// Alpha-weighted distance of the ink centroid from `center`.
fn ink_centroid_distance(img: &RasterImage, center: Point) -> f64 {
    let (mut sum, mut sx, mut sy) = (0.0, 0.0, 0.0);
    for y in 0..img.height() {
        for x in 0..img.width() {
            let a = f64::from(img.pixel(x, y).unwrap()[3]);
            sum += a;
            sx += a * (f64::from(x) + 0.5);
            sy += a * (f64::from(y) + 0.5);
        }
    }
    assert!(sum > 0.0, "nothing painted");
    (Point::new(sx / sum, sy / sum) - center).hypot()
}

#[test]
fn glyph_ink_is_centered_on_the_arc() {
    let Some(mut shaper) = shaper() else { return };
    let center = Point::new(300.0, 300.0);
    for is_bottom in [false, true] {
        for margin in [0.0, 20.0] {
            let s = ArcSpec::new("O", center, 228.0, is_bottom, margin).unwrap();
            let mut surface = Surface::new(600, 600).unwrap();
            draw_arc_text(&mut surface, &mut shaper, &s, Rgba8::BRAND_BLUE);
            let d = ink_centroid_distance(&surface.finish(), center);
            assert!(
                (d - (228.0 - margin)).abs() < 3.0,
                "bottom={is_bottom} margin={margin}: ink at {d}"
            );
        }
    }
}

#[test]
fn top_and_bottom_arcs_are_symmetric() {
    let Some(mut shaper) = shaper() else { return };
    let center = Point::new(300.0, 300.0);
    let mut distances = Vec::new();
    for is_bottom in [false, true] {
        let s = ArcSpec::new("OOO", center, 228.0, is_bottom, 0.0).unwrap();
        let mut surface = Surface::new(600, 600).unwrap();
        draw_arc_text(&mut surface, &mut shaper, &s, Rgba8::BRAND_BLUE);
        distances.push(ink_centroid_distance(&surface.finish(), center));
    }
    assert!((distances[0] - distances[1]).abs() < 3.0, "{distances:?}");
}
