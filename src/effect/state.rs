use std::f64::consts::TAU;

use crate::{
    animation::timeline::Tweenable,
    sampling::point::FieldPoint,
    viewport::scaler::ScaleState,
};

/// Animatable fields of a [`FieldState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKey {
    /// Global zoom.
    Scale,
    /// `current.x` of point `i`.
    X(usize),
    /// `current.y` of point `i`.
    Y(usize),
    /// `drift.x` of point `i`.
    DriftX(usize),
    /// `drift.y` of point `i`.
    DriftY(usize),
    /// `orbit_angle` of point `i`, wrapped into `[0, 2pi)` on write.
    Orbit(usize),
}

/// Everything that changes while the effect runs: the point set and the zoom.
///
/// Owned by [`crate::LivingImage`]; the animation driver writes it during ticks and the
/// renderer reads it during frames. The number of points never changes after sampling.
#[derive(Clone, Debug, Default)]
pub struct FieldState {
    pub(crate) points: Vec<FieldPoint>,
    pub(crate) scale: ScaleState,
}

impl FieldState {
    pub(crate) fn new(points: Vec<FieldPoint>, scale: ScaleState) -> Self {
        Self { points, scale }
    }

    /// The point set.
    pub fn points(&self) -> &[FieldPoint] {
        &self.points
    }

    /// Current zoom state.
    pub fn scale(&self) -> ScaleState {
        self.scale
    }
}

pub(crate) fn wrap_angle(a: f64) -> f64 {
    let w = a.rem_euclid(TAU);
    if w >= TAU { 0.0 } else { w }
}

impl Tweenable<FieldKey> for FieldState {
    fn get(&self, key: FieldKey) -> f64 {
        let p = |i: usize| self.points.get(i);
        match key {
            FieldKey::Scale => self.scale.scale,
            FieldKey::X(i) => p(i).map_or(0.0, |p| p.current.x),
            FieldKey::Y(i) => p(i).map_or(0.0, |p| p.current.y),
            FieldKey::DriftX(i) => p(i).map_or(0.0, |p| p.drift.x),
            FieldKey::DriftY(i) => p(i).map_or(0.0, |p| p.drift.y),
            FieldKey::Orbit(i) => p(i).map_or(0.0, |p| p.orbit_angle),
        }
    }

    fn set(&mut self, key: FieldKey, value: f64) {
        match key {
            FieldKey::Scale => self.scale.scale = value,
            FieldKey::X(i) => {
                if let Some(p) = self.points.get_mut(i) {
                    p.current.x = value;
                }
            }
            FieldKey::Y(i) => {
                if let Some(p) = self.points.get_mut(i) {
                    p.current.y = value;
                }
            }
            FieldKey::DriftX(i) => {
                if let Some(p) = self.points.get_mut(i) {
                    p.drift.x = value;
                }
            }
            FieldKey::DriftY(i) => {
                if let Some(p) = self.points.get_mut(i) {
                    p.drift.y = value;
                }
            }
            FieldKey::Orbit(i) => {
                if let Some(p) = self.points.get_mut(i) {
                    p.orbit_angle = wrap_angle(value);
                }
            }
        }
    }
}
