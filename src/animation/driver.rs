use std::f64::consts::TAU;

use crate::{
    animation::{
        ease::Ease,
        rng::{Rng64, permutation},
        timeline::{Fired, Timeline, TweenHandle, TweenSpec},
    },
    effect::{
        config::EffectConfig,
        state::{FieldKey, FieldState},
    },
    foundation::core::{Point, Range},
    viewport::scaler::ViewportScaler,
};

/// Continuations the driver schedules for itself.
///
/// Every self-repeating program is one tween whose completion cue enqueues the next
/// instance, so there is no callback nesting and each program is killable by handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    /// Orbit turn of point `i` finished; start the next one.
    OrbitTurn(usize),
    /// Drift leg of point `i` arrived; start the next one.
    DriftLeg(usize),
    /// Entrance delay elapsed.
    Entrance,
    /// Entrance interpolation finished; the silhouette is formed.
    EntranceSettled,
    /// Time to reshuffle.
    Shuffle,
    /// A shuffle interpolation finished.
    ShuffleSettled,
}

#[derive(Clone, Copy, Debug)]
struct Choreography {
    drift_offset: Range,
    drift_duration: Range,
    orbit_duration: Range,
    initial_delay: f64,
    initial_duration: f64,
    shuffle_delay: f64,
    shuffle_duration: f64,
}

impl From<&EffectConfig> for Choreography {
    fn from(cfg: &EffectConfig) -> Self {
        Self {
            drift_offset: cfg.drift_offset,
            drift_duration: cfg.drift_duration,
            orbit_duration: cfg.orbit_duration,
            initial_delay: cfg.initial_delay,
            initial_duration: cfg.initial_duration,
            shuffle_delay: cfg.shuffle_delay,
            shuffle_duration: cfg.shuffle_duration,
        }
    }
}

/// Owns every animation acting on a [`FieldState`].
///
/// Per point: an endless chain of orbit turns and one of drift legs. Globally: the
/// one-shot entrance and the periodic shuffle, sequenced as continuations of each other.
#[derive(Debug)]
pub struct AnimationDriver {
    timeline: Timeline<FieldKey, Cue>,
    rng: Rng64,
    plan: Choreography,
    scale_tween: Option<TweenHandle>,
    position_tweens: Vec<Option<TweenHandle>>,
    shuffles: u64,
    settled: bool,
}

impl AnimationDriver {
    pub(crate) fn new(cfg: &EffectConfig, rng: Rng64) -> Self {
        Self {
            timeline: Timeline::new(),
            rng,
            plan: Choreography::from(cfg),
            scale_tween: None,
            position_tweens: Vec::new(),
            shuffles: 0,
            settled: false,
        }
    }

    /// Start orbit and drift for every point and schedule the entrance.
    pub(crate) fn start(&mut self, state: &FieldState) {
        let n = state.points.len();
        self.position_tweens = vec![None; n];
        for i in 0..n {
            self.orbit_turn(i, None);
            self.drift_leg(i, 0.0);
        }
        self.timeline
            .delayed_call(self.plan.initial_delay, Cue::Entrance);
    }

    /// Advance all animations by `dt` seconds and run any continuations that came due.
    pub(crate) fn tick(&mut self, dt: f64, state: &mut FieldState, scaler: &ViewportScaler) {
        for fired in self.timeline.advance(dt, state) {
            self.dispatch(fired, state, scaler);
        }
    }

    /// Halt the in-flight zoom, if any. Safe to call at any time.
    pub(crate) fn cancel_scale(&mut self) -> bool {
        self.scale_tween
            .take()
            .is_some_and(|h| self.timeline.kill(h))
    }

    /// Whether a zoom interpolation is currently running.
    pub fn scale_in_flight(&self) -> bool {
        self.scale_tween.is_some_and(|h| self.timeline.is_active(h))
    }

    /// Number of shuffles started so far.
    pub fn shuffles(&self) -> u64 {
        self.shuffles
    }

    /// Whether the entrance interpolation has finished.
    pub fn settled(&self) -> bool {
        self.settled
    }

    /// Number of scheduled animations.
    pub fn scheduled(&self) -> usize {
        self.timeline.len()
    }

    fn dispatch(&mut self, fired: Fired<Cue>, state: &mut FieldState, scaler: &ViewportScaler) {
        let Fired { cue, late } = fired;
        match cue {
            Cue::OrbitTurn(i) => self.orbit_turn(i, Some(late)),
            Cue::DriftLeg(i) => self.drift_leg(i, late),
            Cue::Entrance => self.entrance(late, state, scaler),
            Cue::EntranceSettled => {
                self.settled = true;
                tracing::debug!(points = state.points.len(), "entrance settled");
                self.timeline
                    .delayed_call(self.plan.shuffle_delay - late, Cue::Shuffle);
            }
            Cue::Shuffle => self.shuffle(late, state),
            Cue::ShuffleSettled => {
                self.timeline
                    .delayed_call(self.plan.shuffle_delay - late, Cue::Shuffle);
            }
        }
    }

    /// One full turn with a freshly drawn period. The first turn starts at a random phase.
    fn orbit_turn(&mut self, i: usize, late: Option<f64>) {
        let period = self.plan.orbit_duration.sample(&mut self.rng);
        let skip = match late {
            Some(late) => carry(late, period),
            None => self.rng.next_f64_01() * period,
        };
        self.timeline.add(
            TweenSpec::new(period)
                .from_to(FieldKey::Orbit(i), 0.0, TAU)
                .delay(-skip)
                .on_complete(Cue::OrbitTurn(i)),
        );
    }

    fn drift_leg(&mut self, i: usize, late: f64) {
        let tx = self.plan.drift_offset.sample(&mut self.rng) * self.rng.sign();
        let ty = self.plan.drift_offset.sample(&mut self.rng) * self.rng.sign();
        let duration = self.plan.drift_duration.sample(&mut self.rng);
        self.timeline.add(
            TweenSpec::new(duration)
                .to(FieldKey::DriftX(i), tx)
                .to(FieldKey::DriftY(i), ty)
                .delay(-carry(late, duration))
                .on_complete(Cue::DriftLeg(i)),
        );
    }

    fn move_point(&mut self, i: usize, to: Point, duration: f64, late: f64) {
        if let Some(prev) = self.position_tweens[i].take() {
            self.timeline.kill(prev);
        }
        let h = self.timeline.add(
            TweenSpec::new(duration)
                .to(FieldKey::X(i), to.x)
                .to(FieldKey::Y(i), to.y)
                .delay(-late),
        );
        self.position_tweens[i] = Some(h);
    }

    fn entrance(&mut self, late: f64, state: &mut FieldState, scaler: &ViewportScaler) {
        state.scale.initiate();
        let target = scaler.contain_scale();
        tracing::debug!(from = state.scale.scale, to = target, "entrance started");

        self.cancel_scale();
        let duration = self.plan.initial_duration;
        self.scale_tween = Some(
            self.timeline.add(
                TweenSpec::new(duration)
                    .to(FieldKey::Scale, target)
                    .ease(Ease::OutQuart)
                    .delay(-late),
            ),
        );

        for i in 0..state.points.len() {
            let home = state.points[i].home();
            self.move_point(i, home, duration, late);
        }

        self.timeline.add(
            TweenSpec::new(duration)
                .delay(-late)
                .on_complete(Cue::EntranceSettled),
        );
    }

    fn shuffle(&mut self, late: f64, state: &mut FieldState) {
        let n = state.points.len();
        let perm = permutation(n, &mut self.rng);
        let homes: Vec<Point> = state.points.iter().map(|p| p.home()).collect();
        let duration = self.plan.shuffle_duration;

        for (i, &src) in perm.iter().enumerate() {
            let target = homes[src];
            state.points[i].retarget(target);
            self.move_point(i, target, duration, late);
        }

        self.shuffles += 1;
        tracing::debug!(cycle = self.shuffles, points = n, "shuffle");
        self.timeline.add(
            TweenSpec::new(duration)
                .delay(-late)
                .on_complete(Cue::ShuffleSettled),
        );
    }
}

/// Lateness a chained leg may skip into itself. Legs shorter than a tick would otherwise
/// pile up lateness without bound.
fn carry(late: f64, duration: f64) -> f64 {
    late.min(duration).max(0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/driver.rs"]
mod tests;
