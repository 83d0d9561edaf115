use anyhow::Context;

use crate::foundation::core::RasterImage;
use crate::foundation::error::StempelResult;

pub(crate) fn decode_image(bytes: &[u8]) -> StempelResult<RasterImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(RasterImage::from_rgba_image(dyn_img.to_rgba8()))
}

/// Premultiplied copy of a straight-alpha raster, as `vello_cpu` pixmaps expect.
pub(crate) fn premultiplied_bytes(img: &RasterImage) -> Vec<u8> {
    let mut out = img.as_bytes().to_vec();
    premultiply_rgba8_in_place(&mut out);
    out
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}
