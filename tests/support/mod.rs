#![allow(dead_code)]

use std::path::PathBuf;

use stempel::{BoldFont, FontSource, RasterImage, StampConfig, Stamper};

/// Write a 400x400 seal fixture: transparent corners, an opaque near-white disc and a blue ring
/// near its edge. Each caller gets its own file so parallel tests never share one.
pub fn write_seal_fixture(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("stempel_fixtures");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("{name}.png"));

    let img = image::RgbaImage::from_fn(400, 400, |x, y| {
        let dx = x as f64 + 0.5 - 200.0;
        let dy = y as f64 + 0.5 - 200.0;
        let d = (dx * dx + dy * dy).sqrt();
        if d > 198.0 {
            image::Rgba([0, 0, 0, 0])
        } else if d >= 185.0 {
            image::Rgba([0x05, 0x6b, 0xb0, 255])
        } else {
            image::Rgba([250, 250, 250, 255])
        }
    });
    img.save_with_format(&path, image::ImageFormat::Png).unwrap();
    path
}

/// Installed bold sans face, or `None` (with a note on stderr) when the machine has none.
pub fn system_font() -> Option<BoldFont> {
    match BoldFont::load(&FontSource::default()) {
        Ok(font) => Some(font),
        Err(e) => {
            eprintln!("skipping: no bold sans font installed ({e})");
            None
        }
    }
}

/// Stamper over a fresh seal fixture, or `None` when no font is installed.
pub fn stamper(name: &str) -> Option<Stamper> {
    let font = system_font()?;
    let config = StampConfig::default().with_seal_path(write_seal_fixture(name));
    Some(Stamper::with_font(config, font).unwrap())
}

pub fn is_brand_blue(px: [u8; 4]) -> bool {
    px[3] > 200 && px[2] > 120 && px[0] < 90 && px[2] > px[0] + 60
}

/// Decode every QR code in `img` after surrounding it with a white quiet zone.
pub fn decode_qr(img: &RasterImage, quiet: u32) -> Vec<String> {
    let w = (img.width() + 2 * quiet) as usize;
    let h = (img.height() + 2 * quiet) as usize;
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(w, h, |x, y| {
        let (x, y) = (x as i64 - quiet as i64, y as i64 - quiet as i64);
        if x < 0 || y < 0 {
            return 255;
        }
        match img.pixel(x as u32, y as u32) {
            Some([r, g, b, a]) => {
                let luma = (299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000;
                // Composite over white.
                (255 - (a as u32 * (255 - luma)) / 255) as u8
            }
            None => 255,
        }
    });
    prepared
        .detect_grids()
        .into_iter()
        .filter_map(|g| g.decode().ok().map(|(_, content)| content))
        .collect()
}
