use crate::foundation::core::{Point, Vec2};

/// One particle of the field, anchored to a grid cell of the source silhouette.
///
/// `home` is fixed at creation. Shuffles re-target a point by changing `target` (which
/// home it is currently travelling to); they never rewrite `home`.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldPoint {
    home: Point,
    target: Point,
    /// Live base position in image space.
    pub current: Point,
    /// Perpetual small offset layered on top of `current`.
    pub drift: Vec2,
    /// Orbit phase in radians, kept in `[0, 2pi)`.
    pub orbit_angle: f64,
    /// Radius of the orbit circle in image-space pixels.
    pub orbit_radius: f64,
    /// Visual disc radius in surface pixels.
    pub radius: f64,
}

impl FieldPoint {
    /// New point resting at `current`, assigned to its own `home`.
    pub fn new(home: Point, current: Point, radius: f64, orbit_radius: f64) -> Self {
        Self {
            home,
            target: home,
            current,
            drift: Vec2::ZERO,
            orbit_angle: 0.0,
            orbit_radius,
            radius,
        }
    }

    /// Cell center this point was sampled from.
    pub fn home(&self) -> Point {
        self.home
    }

    /// Home position the point is currently assigned to.
    pub fn target(&self) -> Point {
        self.target
    }

    pub(crate) fn retarget(&mut self, target: Point) {
        self.target = target;
    }

    /// Orbit displacement `(cos a, sin a) * r`.
    pub fn orbit_offset(&self) -> Vec2 {
        let (sin, cos) = self.orbit_angle.sin_cos();
        Vec2::new(cos, sin) * self.orbit_radius
    }

    /// Final image-space draw position: base + drift + orbit.
    pub fn draw_position(&self) -> Point {
        self.current + self.drift + self.orbit_offset()
    }
}
