use super::*;

const PAYLOAD: &str = "https://example.org/verify/123";

fn assert_finder_at(m: &QrMatrix, ox: usize, oy: usize) {
    // Outer ring dark, ring inside it light, 3x3 core dark.
    for i in 0..7 {
        assert!(m.is_dark(ox + i, oy));
        assert!(m.is_dark(ox + i, oy + 6));
        assert!(m.is_dark(ox, oy + i));
        assert!(m.is_dark(ox + 6, oy + i));
    }
    for i in 1..6 {
        assert!(!m.is_dark(ox + i, oy + 1));
        assert!(!m.is_dark(ox + 1, oy + i));
    }
    for y in 2..5 {
        for x in 2..5 {
            assert!(m.is_dark(ox + x, oy + y));
        }
    }
}

#[test]
fn encodes_verification_url_at_level_h() {
    let m = encode_qr(PAYLOAD, ErrorCorrection::High).unwrap();
    // 30 bytes at level H needs version 4.
    assert_eq!(m.width(), 33);
    let w = m.width();
    assert_finder_at(&m, 0, 0);
    assert_finder_at(&m, w - 7, 0);
    assert_finder_at(&m, 0, w - 7);
    assert!(!m.is_dark(w, 0));
}

#[test]
fn lower_levels_fit_in_smaller_symbols() {
    let high = encode_qr(PAYLOAD, ErrorCorrection::High).unwrap();
    let low = encode_qr(PAYLOAD, ErrorCorrection::Low).unwrap();
    assert!(low.width() < high.width());
}

#[test]
fn oversized_payload_is_a_qr_error() {
    let payload = "x".repeat(4_000);
    let err = encode_qr(&payload, ErrorCorrection::High).unwrap_err();
    assert!(matches!(err, StempelError::QrEncoding(_)), "{err}");
}

#[test]
fn rasterize_maps_pixels_to_modules_by_floor() {
    let m = encode_qr(PAYLOAD, ErrorCorrection::High).unwrap();
    let size = 600;
    let img = m.rasterize(size, Rgba8::BRAND_BLUE, Rgba8::WHITE).unwrap();
    assert_eq!((img.width(), img.height()), (size, size));

    for &(x, y) in &[(0u32, 0u32), (599, 0), (0, 599), (300, 300), (123, 457), (18, 18)] {
        let mx = x as usize * m.width() / size as usize;
        let my = y as usize * m.width() / size as usize;
        let expected = if m.is_dark(mx, my) {
            Rgba8::BRAND_BLUE
        } else {
            Rgba8::WHITE
        };
        assert_eq!(img.pixel(x, y).unwrap(), expected.to_array(), "at ({x},{y})");
    }

    assert!(m.rasterize(0, Rgba8::BRAND_BLUE, Rgba8::WHITE).is_err());
}
