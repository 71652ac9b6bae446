use crate::animation::rng::Rng64;
use crate::foundation::error::{LivingError, LivingResult};

pub use kurbo::{Affine, Point, Vec2};

/// Pixel dimensions of a surface or container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a canvas from width and height.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Closed `[min, max]` interval of `f64` values, sampled uniformly.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Range {
    /// Lower bound (inclusive).
    pub min: f64,
    /// Upper bound (inclusive).
    pub max: f64,
}

impl Range {
    /// Build a range. Bounds are checked by [`Range::validate`], not here.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Degenerate range that always samples `v`.
    pub const fn fixed(v: f64) -> Self {
        Self { min: v, max: v }
    }

    /// Uniform sample in `[min, max]`.
    pub fn sample(self, rng: &mut Rng64) -> f64 {
        rng.range(self.min, self.max)
    }

    /// Check that both bounds are finite, ordered and (optionally) non-negative.
    pub fn validate(self, name: &str, non_negative: bool) -> LivingResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(LivingError::validation(format!(
                "{name} bounds must be finite"
            )));
        }
        if self.min > self.max {
            return Err(LivingError::validation(format!(
                "{name} min must be <= max (got {}..{})",
                self.min, self.max
            )));
        }
        if non_negative && self.min < 0.0 {
            return Err(LivingError::validation(format!(
                "{name} must be >= 0 (got min {})",
                self.min
            )));
        }
        Ok(())
    }
}
