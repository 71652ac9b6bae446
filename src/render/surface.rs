use crate::foundation::{
    core::{Affine, Canvas, Point, Vec2},
    error::LivingResult,
};

/// 2D paint target the renderer draws into.
///
/// Mirrors a canvas-style immediate-mode context: a current transform that `translate`
/// and `scale` post-multiply, a save/restore stack for it, and filled circles.
pub trait Surface {
    /// Current pixel size.
    fn size(&self) -> Canvas;

    /// Reallocate to a new pixel size. Contents after a resize are unspecified.
    fn resize(&mut self, size: Canvas) -> LivingResult<()>;

    /// Clear the whole surface, ignoring the current transform.
    fn clear(&mut self);

    /// Push the current transform.
    fn save(&mut self);

    /// Pop the transform pushed by the matching [`Surface::save`].
    fn restore(&mut self);

    /// Post-multiply a translation.
    fn translate(&mut self, by: Vec2);

    /// Post-multiply a uniform scale.
    fn scale(&mut self, s: f64);

    /// Fill a disc at `center` with `radius`, both in current user space.
    fn fill_circle(&mut self, center: Point, radius: f64);
}

/// Save/restore transform stack shared by surface implementations.
#[derive(Clone, Debug, Default)]
pub struct TransformStack {
    current: Affine,
    saved: Vec<Affine>,
}

impl TransformStack {
    /// Transform currently in force.
    pub fn current(&self) -> Affine {
        self.current
    }

    /// Number of unmatched saves.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Push the current transform.
    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Pop the last pushed transform; unbalanced restores are ignored.
    pub fn restore(&mut self) {
        if let Some(t) = self.saved.pop() {
            self.current = t;
        }
    }

    /// Post-multiply a translation.
    pub fn translate(&mut self, by: Vec2) {
        self.current = self.current * Affine::translate(by);
    }

    /// Post-multiply a uniform scale.
    pub fn scale(&mut self, s: f64) {
        self.current = self.current * Affine::scale(s);
    }

    /// Drop every saved transform and reset to identity.
    pub fn reset(&mut self) {
        self.current = Affine::IDENTITY;
        self.saved.clear();
    }
}

/// One command captured by [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    /// `clear()`.
    Clear,
    /// A filled disc, already mapped to surface pixels.
    Circle {
        /// Center in surface pixels.
        center: Point,
        /// Radius in surface pixels.
        radius: f64,
    },
}

/// Headless surface that records what was painted, in surface-pixel coordinates.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    size: Canvas,
    stack: TransformStack,
    commands: Vec<DrawCmd>,
}

impl RecordingSurface {
    /// New surface of the given size.
    pub fn new(size: Canvas) -> Self {
        Self {
            size,
            stack: TransformStack::default(),
            commands: Vec::new(),
        }
    }

    /// Commands since the last clear (the clear itself included).
    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    /// Discs painted since the last clear.
    pub fn circles(&self) -> impl Iterator<Item = (Point, f64)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCmd::Circle { center, radius } => Some((*center, *radius)),
            DrawCmd::Clear => None,
        })
    }

    /// Unmatched save count; zero between frames.
    pub fn save_depth(&self) -> usize {
        self.stack.depth()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Canvas {
        self.size
    }

    fn resize(&mut self, size: Canvas) -> LivingResult<()> {
        self.size = size;
        self.stack.reset();
        self.commands.clear();
        Ok(())
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCmd::Clear);
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
        let t = self.stack.current();
        let [a, b, _, _, _, _] = t.as_coeffs();
        let uniform = (a * a + b * b).sqrt();
        self.commands.push(DrawCmd::Circle {
            center: t * center,
            radius: radius * uniform,
        });
    }
}
