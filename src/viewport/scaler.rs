use crate::foundation::core::Canvas;

/// Which scale formula is in force.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Before the entrance fires: oversized "cover" scale.
    Entrance,
    /// After the entrance fired: "contain" scale, never above native size.
    Steady,
}

/// Current uniform zoom of the field and whether the entrance has fired.
///
/// `initiated` flips to `true` exactly once and never back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleState {
    /// Uniform image-to-surface scale.
    pub scale: f64,
    initiated: bool,
}

impl Default for ScaleState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            initiated: false,
        }
    }
}

impl ScaleState {
    /// Whether the entrance has fired.
    pub fn initiated(&self) -> bool {
        self.initiated
    }

    /// Phase implied by `initiated`.
    pub fn phase(&self) -> Phase {
        if self.initiated {
            Phase::Steady
        } else {
            Phase::Entrance
        }
    }

    /// One-way switch into the steady phase.
    pub(crate) fn initiate(&mut self) {
        self.initiated = true;
    }
}

/// Computes the field scale from the container size and the image's intrinsic size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportScaler {
    container: Canvas,
    image: Canvas,
    initial_scale: f64,
}

impl ViewportScaler {
    /// `image` must have non-zero dimensions; `initial_scale` is the entrance overshoot.
    pub fn new(container: Canvas, image: Canvas, initial_scale: f64) -> Self {
        Self {
            container,
            image,
            initial_scale,
        }
    }

    /// Current container size.
    pub fn container(&self) -> Canvas {
        self.container
    }

    /// Image intrinsic size.
    pub fn image(&self) -> Canvas {
        self.image
    }

    /// Record a new container size.
    pub fn set_container(&mut self, container: Canvas) {
        self.container = container;
    }

    fn ratios(&self) -> (f64, f64) {
        (
            f64::from(self.container.width) / f64::from(self.image.width.max(1)),
            f64::from(self.container.height) / f64::from(self.image.height.max(1)),
        )
    }

    /// `min(cw / iw, ch / ih, 1)`: fits inside the container, never enlarges.
    pub fn contain_scale(&self) -> f64 {
        let (sx, sy) = self.ratios();
        sx.min(sy).min(1.0)
    }

    /// `max(cw / iw, ch / ih) * initial_scale`: overflows the container.
    pub fn cover_scale(&self) -> f64 {
        let (sx, sy) = self.ratios();
        sx.max(sy) * self.initial_scale
    }

    /// Scale for `phase`.
    pub fn compute_scale(&self, phase: Phase) -> f64 {
        match phase {
            Phase::Entrance => self.cover_scale(),
            Phase::Steady => self.contain_scale(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/scaler.rs"]
mod tests;
