use std::sync::Arc;

use vello_cpu::kurbo::Shape;

use crate::assets::color::Rgba8;
use crate::assets::decode::premultiplied_bytes;
use crate::foundation::core::{Affine, Point, RasterImage, Rect};
use crate::foundation::error::{StempelError, StempelResult};

/// A glyph positioned inside a shaped run, relative to the run's transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ShapedGlyph {
    pub(crate) id: u32,
    pub(crate) x: f32,
    pub(crate) y: f32,
}

/// Drawing canvas for one render call, backed by `vello_cpu`.
///
/// Every draw call takes its own transform; nothing carries over from one call to the next.
/// [`Surface::finish`] rasterizes the recorded commands into a [`RasterImage`].
pub struct Surface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

impl Surface {
    /// Transparent surface of `width x height` pixels (each at most `u16::MAX`).
    pub fn new(width: u32, height: u32) -> StempelResult<Self> {
        let w = to_u16(width, "surface width")?;
        let h = to_u16(height, "surface height")?;
        if w == 0 || h == 0 {
            return Err(StempelError::validation("surface dimensions must be > 0"));
        }
        Ok(Self {
            width: w,
            height: h,
            ctx: vello_cpu::RenderContext::new(w, h),
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Fill `rect` (surface coordinates) with a solid color.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.reset_state(Affine::IDENTITY);
        self.ctx.set_paint(color.to_paint());
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    /// Fill a disc of `radius` around `center` with a solid color.
    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        self.reset_state(Affine::IDENTITY);
        self.ctx.set_paint(color.to_paint());
        let path =
            vello_cpu::kurbo::Circle::new(vello_cpu::kurbo::Point::new(center.x, center.y), radius)
                .to_path(0.1);
        self.ctx.fill_path(&path);
    }

    /// Draw `image` stretched into `dest`.
    pub fn draw_image(&mut self, image: &RasterImage, dest: Rect) -> StempelResult<()> {
        let paint = image_paint(image)?;
        let w = f64::from(image.width());
        let h = f64::from(image.height());
        let transform = Affine::translate(dest.origin().to_vec2())
            * Affine::scale_non_uniform(dest.width() / w, dest.height() / h);

        self.reset_state(transform);
        self.ctx.set_paint(paint);
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        Ok(())
    }

    /// Fill one shaped run of glyphs under `transform`.
    pub(crate) fn fill_glyphs(
        &mut self,
        font: &vello_cpu::peniko::FontData,
        font_size: f32,
        transform: Affine,
        color: Rgba8,
        glyphs: &[ShapedGlyph],
    ) {
        if glyphs.is_empty() {
            return;
        }
        self.reset_state(transform);
        self.ctx.set_paint(color.to_paint());
        self.ctx
            .glyph_run(font)
            .font_size(font_size)
            .fill_glyphs(glyphs.iter().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            }));
    }

    /// Rasterize everything drawn so far.
    pub fn finish(mut self) -> RasterImage {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);

        let mut rgba8 = Vec::with_capacity((self.width as usize) * (self.height as usize) * 4);
        for px in pixmap.take_unpremultiplied() {
            rgba8.extend_from_slice(&[px.r, px.g, px.b, px.a]);
        }
        RasterImage::from_parts(u32::from(self.width), u32::from(self.height), rgba8)
    }

    fn reset_state(&mut self, transform: Affine) {
        self.ctx
            .set_blend_mode(vello_cpu::peniko::BlendMode::default());
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(transform));
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn to_u16(v: u32, what: &str) -> StempelResult<u16> {
    v.try_into()
        .map_err(|_| StempelError::validation(format!("{what} exceeds u16")))
}

fn image_paint(image: &RasterImage) -> StempelResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(
        &premultiplied_bytes(image),
        image.width(),
        image.height(),
    )?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> StempelResult<vello_cpu::Pixmap> {
    let w = to_u16(width, "image width")?;
    let h = to_u16(height, "image height")?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(StempelError::validation("pixmap byte len mismatch"));
    }
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
