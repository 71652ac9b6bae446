use crate::{
    effect::state::FieldState,
    foundation::core::{Canvas, Vec2},
    render::surface::Surface,
};

/// Paints one frame of the field: image space centered in the surface, uniformly scaled.
#[derive(Clone, Copy, Debug)]
pub struct FrameRenderer {
    image: Canvas,
}

impl FrameRenderer {
    /// Renderer for an image of intrinsic size `image`.
    pub fn new(image: Canvas) -> Self {
        Self { image }
    }

    /// Clear `surface` and paint every point of `state` at its current draw position.
    ///
    /// Disc radii are divided by the zoom so discs keep their on-screen size. A zoom of
    /// zero (empty container) or a non-finite one paints nothing after the clear.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, state: &FieldState) {
        surface.clear();

        let scale = state.scale.scale;
        if !(scale > 0.0) || !scale.is_finite() {
            return;
        }

        let size = surface.size();
        surface.save();
        surface.translate(Vec2::new(
            f64::from(size.width) / 2.0,
            f64::from(size.height) / 2.0,
        ));
        surface.scale(scale);
        surface.translate(Vec2::new(
            -f64::from(self.image.width) / 2.0,
            -f64::from(self.image.height) / 2.0,
        ));
        for p in &state.points {
            surface.fill_circle(p.draw_position(), p.radius / scale);
        }
        surface.restore();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
