use crate::{
    animation::{driver::AnimationDriver, rng::Rng64},
    assets::source::SourceImage,
    effect::{config::EffectConfig, state::FieldState},
    foundation::{core::Canvas, error::LivingResult},
    render::{frame::FrameRenderer, surface::Surface},
    sampling::{
        point::FieldPoint,
        sampler::{SampleOpts, sample_points},
    },
    viewport::scaler::{ScaleState, ViewportScaler},
};

/// The running effect: owns the point field, its animations, the zoom and the surface.
///
/// Time is driven explicitly. Call [`LivingImage::tick`] with the seconds elapsed since
/// the previous call and [`LivingImage::render_frame`] once per display refresh, or both
/// at once with [`LivingImage::frame`]. Dropping the value is teardown.
#[derive(Debug)]
pub struct LivingImage<S: Surface> {
    surface: S,
    state: FieldState,
    driver: AnimationDriver,
    scaler: ViewportScaler,
    renderer: FrameRenderer,
    elapsed: f64,
}

impl<S: Surface> LivingImage<S> {
    /// Validate `config`, sample `image` and start every animation.
    ///
    /// The field starts zoomed to the entrance (cover) scale for the surface's current
    /// size; the entrance itself fires after `config.initial_delay` seconds of ticks.
    #[tracing::instrument(skip(image, surface, config), fields(width = image.width(), height = image.height()))]
    pub fn new(image: &SourceImage, surface: S, config: &EffectConfig) -> LivingResult<Self> {
        config.validate()?;

        let mut rng = Rng64::new(config.seed);
        let opts = SampleOpts {
            grid: config.grid,
            point_radius: config.point_radius,
            orbit_radius: config.orbit_radius,
        };
        let points = sample_points(image, &opts, &mut rng);

        let scaler = ViewportScaler::new(surface.size(), image.size(), config.initial_scale);
        let mut state = FieldState::new(points, ScaleState::default());
        state.scale.scale = scaler.compute_scale(state.scale.phase());

        let mut driver = AnimationDriver::new(config, rng.fork());
        driver.start(&state);

        tracing::debug!(
            points = state.points.len(),
            scale = state.scale.scale,
            "living image ready"
        );
        Ok(Self {
            surface,
            state,
            driver,
            scaler,
            renderer: FrameRenderer::new(image.size()),
            elapsed: 0.0,
        })
    }

    /// Advance every animation by `dt` seconds. Negative or non-finite steps count as zero.
    pub fn tick(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.driver.tick(dt, &mut self.state, &self.scaler);
    }

    /// Paint the current state into the surface.
    pub fn render_frame(&mut self) {
        self.renderer.render(&mut self.surface, &self.state);
    }

    /// `tick(dt)` followed by `render_frame()`.
    pub fn frame(&mut self, dt: f64) {
        self.tick(dt);
        self.render_frame();
    }

    /// React to a container resize.
    ///
    /// Cancels any zoom in flight, resizes the surface and snaps the zoom to the formula
    /// of the current phase. Point animations are not touched. If the surface rejects the
    /// size, the error is returned and the effect keeps running at the previous size.
    pub fn resize(&mut self, width: u32, height: u32) -> LivingResult<()> {
        let size = Canvas::new(width, height);
        self.surface.resize(size)?;
        let cancelled = self.driver.cancel_scale();
        self.scaler.set_container(size);
        self.state.scale.scale = self.scaler.compute_scale(self.state.scale.phase());
        tracing::trace!(
            width,
            height,
            scale = self.state.scale.scale,
            cancelled,
            "resize snap"
        );
        Ok(())
    }

    /// Endless iterator producing one rendered frame per item, `dt` seconds apart.
    ///
    /// Each item is the elapsed time after that frame.
    pub fn frames(&mut self, dt: f64) -> Frames<'_, S> {
        Frames { effect: self, dt }
    }

    /// The point set.
    pub fn points(&self) -> &[FieldPoint] {
        self.state.points()
    }

    /// Points and zoom together, as the renderer sees them.
    pub fn state(&self) -> &FieldState {
        &self.state
    }

    /// Current zoom and phase.
    pub fn scale_state(&self) -> ScaleState {
        self.state.scale()
    }

    /// Seconds ticked so far.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of shuffles started so far.
    pub fn shuffles(&self) -> u64 {
        self.driver.shuffles()
    }

    /// Whether the entrance has finished its interpolation.
    pub fn settled(&self) -> bool {
        self.driver.settled()
    }

    /// Whether a zoom interpolation is running.
    pub fn scale_in_flight(&self) -> bool {
        self.driver.scale_in_flight()
    }

    /// Number of tweens and delayed calls currently scheduled.
    pub fn scheduled_animations(&self) -> usize {
        self.driver.scheduled()
    }

    /// The surface being painted.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface, e.g. to present or read back pixels.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Tear down and hand back the surface.
    pub fn into_surface(self) -> S {
        self.surface
    }
}

/// Iterator returned by [`LivingImage::frames`]. Never ends.
#[derive(Debug)]
pub struct Frames<'a, S: Surface> {
    effect: &'a mut LivingImage<S>,
    dt: f64,
}

impl<S: Surface> Iterator for Frames<'_, S> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        self.effect.frame(self.dt);
        Some(self.effect.elapsed())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effect/living.rs"]
mod tests;
