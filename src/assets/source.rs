use std::sync::Arc;

use crate::foundation::core::Canvas;
use crate::foundation::error::{LivingError, LivingResult};

/// Decoded source image the point field is sampled from.
///
/// Pixels are straight (non-premultiplied) RGBA8, row-major, tightly packed. Only the
/// alpha channel matters for sampling.
#[derive(Clone, Debug)]
pub struct SourceImage {
    width: u32,
    height: u32,
    rgba8: Arc<Vec<u8>>,
}

impl SourceImage {
    /// Wrap a raw RGBA8 buffer, checking its shape.
    pub fn new(width: u32, height: u32, rgba8: Vec<u8>) -> LivingResult<Self> {
        if width == 0 || height == 0 {
            return Err(LivingError::image(format!(
                "image must have non-zero dimensions (got {width}x{height})"
            )));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(4))
            .ok_or_else(|| LivingError::image("image dimensions overflow"))?;
        if rgba8.len() != expected {
            return Err(LivingError::image(format!(
                "rgba8 buffer has {} bytes, expected {expected} for {width}x{height}",
                rgba8.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8: Arc::new(rgba8),
        })
    }

    /// Convert an `image` crate RGBA buffer.
    pub fn from_rgba_image(img: image::RgbaImage) -> LivingResult<Self> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Intrinsic width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Intrinsic height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Intrinsic size.
    pub fn size(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    /// Raw RGBA8 bytes.
    pub fn rgba8(&self) -> &[u8] {
        &self.rgba8
    }

    /// Alpha of pixel `(x, y)`; out-of-bounds pixels read as fully transparent.
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4 + 3;
        self.rgba8[i]
    }

    /// One row of pixels as RGBA8 bytes.
    pub(crate) fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * 4;
        let start = y as usize * stride;
        &self.rgba8[start..start + stride]
    }
}
