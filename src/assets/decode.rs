use std::path::Path;

use anyhow::Context;

use crate::{
    assets::source::SourceImage,
    foundation::{
        error::{LivingError, LivingResult},
        math::unpremultiply_rgba8_in_place,
    },
};

const MAX_SVG_DIM: u32 = 16_384;

/// Decode encoded raster bytes (PNG, JPEG, ...) into a [`SourceImage`].
pub fn decode_image(bytes: &[u8]) -> LivingResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    SourceImage::from_rgba_image(dyn_img.to_rgba8())
}

/// Parse SVG bytes and rasterize them at their intrinsic size.
pub fn rasterize_svg(bytes: &[u8]) -> LivingResult<SourceImage> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;

    fn to_px(v: f32) -> LivingResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(LivingError::image("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    let width = to_px(tree.size().width())?;
    let height = to_px(tree.size().height())?;
    if width > MAX_SVG_DIM || height > MAX_SVG_DIM {
        return Err(LivingError::image(format!(
            "svg raster size too large: {width}x{height} (max {MAX_SVG_DIM}x{MAX_SVG_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| LivingError::image("failed to allocate svg pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    let mut rgba8 = pixmap.take();
    unpremultiply_rgba8_in_place(&mut rgba8);
    SourceImage::new(width, height, rgba8)
}

/// Read an image file, rasterizing `.svg` files and decoding everything else.
#[tracing::instrument]
pub fn load_image(path: &Path) -> LivingResult<SourceImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    let img = if is_svg {
        rasterize_svg(&bytes)?
    } else {
        decode_image(&bytes)?
    };
    tracing::debug!(width = img.width(), height = img.height(), "loaded source image");
    Ok(img)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
