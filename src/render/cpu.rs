use vello_cpu::kurbo::Shape;

use crate::{
    foundation::{
        core::{Affine, Canvas, Point, Vec2},
        error::{LivingError, LivingResult},
        math::unpremultiply_rgba8_in_place,
    },
    render::surface::{Surface, TransformStack},
};

/// Read back pixels from a [`CpuSurface`].
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 pixels.
    pub data: Vec<u8>,
    /// Whether `data` carries premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixels, as image encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }

    /// Alpha of pixel `(x, y)`, or 0 outside the frame.
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[(y as usize * self.width as usize + x as usize) * 4 + 3]
    }
}

/// Raster [`Surface`] backed by `vello_cpu`.
///
/// Drawing commands are recorded between [`Surface::clear`] and [`CpuSurface::present`];
/// `present` rasterizes them into the pixmap that [`CpuSurface::to_frame`] reads.
pub struct CpuSurface {
    size: Canvas,
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    stack: TransformStack,
    paint: [u8; 4],
    clear_rgba: Option<[u8; 4]>,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("size", &self.size)
            .field("paint", &self.paint)
            .field("clear_rgba", &self.clear_rgba)
            .finish_non_exhaustive()
    }
}

fn backing_dims(size: Canvas) -> LivingResult<(u16, u16)> {
    let w: u16 = size
        .width
        .try_into()
        .map_err(|_| LivingError::render("surface width exceeds u16"))?;
    let h: u16 = size
        .height
        .try_into()
        .map_err(|_| LivingError::render("surface height exceeds u16"))?;
    // Zero-sized containers still get a 1x1 backing store; nothing is visible in them.
    Ok((w.max(1), h.max(1)))
}

impl CpuSurface {
    /// Allocate a surface of `size` pixels painting opaque white discs.
    pub fn new(size: Canvas) -> LivingResult<Self> {
        let (width, height) = backing_dims(size)?;
        Ok(Self {
            size,
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
            stack: TransformStack::default(),
            paint: [255, 255, 255, 255],
            clear_rgba: None,
        })
    }

    /// Disc colour (straight RGBA8).
    pub fn with_paint(mut self, rgba: [u8; 4]) -> Self {
        self.paint = rgba;
        self
    }

    /// Background colour laid down by every clear; `None` clears to transparent.
    pub fn with_clear_rgba(mut self, clear: Option<[u8; 4]>) -> Self {
        self.clear_rgba = clear;
        self
    }

    /// Rasterize everything drawn since the last clear.
    pub fn present(&mut self) {
        self.pixmap.data_as_u8_slice_mut().fill(0);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
    }

    /// Copy out the last presented pixels (premultiplied).
    pub fn to_frame(&self) -> FrameRGBA {
        let data = if self.size.is_empty() {
            Vec::new()
        } else {
            self.pixmap.data_as_u8_slice().to_vec()
        };
        FrameRGBA {
            width: self.size.width,
            height: self.size.height,
            data,
            premultiplied: true,
        }
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

impl Surface for CpuSurface {
    fn size(&self) -> Canvas {
        self.size
    }

    fn resize(&mut self, size: Canvas) -> LivingResult<()> {
        let (width, height) = backing_dims(size)?;
        if (width, height) != (self.width, self.height) {
            self.ctx = vello_cpu::RenderContext::new(width, height);
            self.pixmap = vello_cpu::Pixmap::new(width, height);
            self.width = width;
            self.height = height;
        }
        self.size = size;
        self.stack.reset();
        self.ctx.reset();
        Ok(())
    }

    fn clear(&mut self) {
        self.ctx.reset();
        if let Some([r, g, b, a]) = self.clear_rgba {
            self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            self.ctx
                .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
        }
    }

    fn save(&mut self) {
        self.stack.save();
    }

    fn restore(&mut self) {
        self.stack.restore();
    }

    fn translate(&mut self, by: Vec2) {
        self.stack.translate(by);
    }

    fn scale(&mut self, s: f64) {
        self.stack.scale(s);
    }

    fn fill_circle(&mut self, center: Point, radius: f64) {
        if !(radius > 0.0) || !radius.is_finite() {
            return;
        }
        let [r, g, b, a] = self.paint;
        self.ctx.set_transform(affine_to_cpu(self.stack.current()));
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        let circle =
            vello_cpu::kurbo::Circle::new(vello_cpu::kurbo::Point::new(center.x, center.y), radius);
        self.ctx.fill_path(&circle.to_path(radius * 0.01));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
