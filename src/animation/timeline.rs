use crate::animation::ease::Ease;

/// A value store a [`Timeline`] can animate, addressed by keys of type `K`.
pub trait Tweenable<K> {
    /// Current value of `key`.
    fn get(&self, key: K) -> f64;
    /// Overwrite the value of `key`.
    fn set(&mut self, key: K, value: f64);
}

/// Handle to a scheduled tween or delayed call.
///
/// Handles are generation-checked: a handle whose tween already finished (or was killed)
/// never aliases a newer tween that reused the same slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TweenHandle {
    index: usize,
    generation: u64,
}

/// Whether a tween plays once or loops forever.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Repeat {
    /// Play once, then fire the completion cue and retire.
    #[default]
    Once,
    /// Restart from the start values every `duration` seconds; never completes.
    Forever,
}

#[derive(Clone, Copy, Debug)]
struct Track<K> {
    key: K,
    from: Option<f64>,
    to: f64,
}

/// Description of one tween: which keys move where, over how long, and what to emit
/// when done.
#[derive(Clone, Debug)]
pub struct TweenSpec<K, E> {
    tracks: Vec<Track<K>>,
    duration: f64,
    delay: f64,
    ease: Ease,
    repeat: Repeat,
    on_complete: Option<E>,
}

impl<K, E> TweenSpec<K, E> {
    /// Empty tween lasting `duration` seconds. Negative or NaN durations become zero.
    pub fn new(duration: f64) -> Self {
        Self {
            tracks: Vec::new(),
            duration: if duration > 0.0 { duration } else { 0.0 },
            delay: 0.0,
            ease: Ease::default(),
            repeat: Repeat::Once,
            on_complete: None,
        }
    }

    /// Animate `key` from whatever value it holds when the tween starts to `end`.
    pub fn to(mut self, key: K, end: f64) -> Self {
        self.tracks.push(Track {
            key,
            from: None,
            to: end,
        });
        self
    }

    /// Animate `key` from `start` to `end`.
    pub fn from_to(mut self, key: K, start: f64, end: f64) -> Self {
        self.tracks.push(Track {
            key,
            from: Some(start),
            to: end,
        });
        self
    }

    /// Wait `secs` before starting. Negative delays start the tween already `-secs` in.
    pub fn delay(mut self, secs: f64) -> Self {
        self.delay = if secs.is_finite() { secs } else { 0.0 };
        self
    }

    /// Easing curve applied to progress.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Repeat mode.
    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Cue returned from [`Timeline::advance`] when the tween finishes.
    pub fn on_complete(mut self, cue: E) -> Self {
        self.on_complete = Some(cue);
        self
    }

    /// Configured duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }
}

/// A completion cue emitted by [`Timeline::advance`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fired<E> {
    /// The cue attached with [`TweenSpec::on_complete`].
    pub cue: E,
    /// Seconds between the exact completion instant and the end of the tick that observed
    /// it. Continuations subtract this from their own delay to stay on schedule.
    pub late: f64,
}

#[derive(Debug)]
struct Active<K, E> {
    spec: TweenSpec<K, E>,
    elapsed: f64,
    started: bool,
}

#[derive(Debug)]
struct Slot<K, E> {
    generation: u64,
    tween: Option<Active<K, E>>,
}

/// Time-based tween scheduler.
///
/// Drives `f64` fields of a [`Tweenable`] target over wall-clock seconds. Everything
/// runs on the caller's thread: nothing moves until [`Timeline::advance`] is called, and
/// completion callbacks are returned as data instead of being invoked re-entrantly.
#[derive(Debug)]
pub struct Timeline<K, E> {
    slots: Vec<Slot<K, E>>,
    free: Vec<usize>,
    live: usize,
    time: f64,
}

impl<K, E> Default for Timeline<K, E> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            time: 0.0,
        }
    }
}

impl<K: Copy, E> Timeline<K, E> {
    /// Empty timeline at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total seconds advanced so far.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Number of scheduled tweens (pending or running).
    pub fn len(&self) -> usize {
        self.live
    }

    /// True when nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Schedule a tween.
    pub fn add(&mut self, spec: TweenSpec<K, E>) -> TweenHandle {
        let active = Active {
            spec,
            elapsed: 0.0,
            started: false,
        };
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.tween = Some(active);
            return TweenHandle {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len();
        self.slots.push(Slot {
            generation: 0,
            tween: Some(active),
        });
        TweenHandle {
            index,
            generation: 0,
        }
    }

    /// Emit `cue` after `delay` seconds without touching any value.
    pub fn delayed_call(&mut self, delay: f64, cue: E) -> TweenHandle {
        self.add(TweenSpec::new(0.0).delay(delay).on_complete(cue))
    }

    /// Whether `handle` still refers to a pending or running tween.
    pub fn is_active(&self, handle: TweenHandle) -> bool {
        self.slots
            .get(handle.index)
            .is_some_and(|s| s.generation == handle.generation && s.tween.is_some())
    }

    /// Stop a tween where it is, without emitting its completion cue.
    ///
    /// Safe on finished, already-killed or foreign handles; returns whether anything stopped.
    pub fn kill(&mut self, handle: TweenHandle) -> bool {
        if !self.is_active(handle) {
            return false;
        }
        self.retire(handle.index);
        true
    }

    /// Stop every scheduled tween.
    pub fn clear(&mut self) {
        for index in 0..self.slots.len() {
            if self.slots[index].tween.is_some() {
                self.retire(index);
            }
        }
    }

    fn retire(&mut self, index: usize) -> Option<Active<K, E>> {
        let slot = &mut self.slots[index];
        let out = slot.tween.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        self.live -= 1;
        Some(out)
    }

    /// Move time forward by `dt` seconds, writing interpolated values into `target`.
    ///
    /// Returns the completion cues of every tween that finished during this step, in
    /// scheduling-slot order.
    pub fn advance<T: Tweenable<K>>(&mut self, dt: f64, target: &mut T) -> Vec<Fired<E>> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.time += dt;

        let mut fired = Vec::new();
        for index in 0..self.slots.len() {
            let Some(active) = self.slots[index].tween.as_mut() else {
                continue;
            };
            active.elapsed += dt;
            let local = active.elapsed - active.spec.delay;
            if local < 0.0 {
                continue;
            }

            if !active.started {
                active.started = true;
                for track in &mut active.spec.tracks {
                    if track.from.is_none() {
                        track.from = Some(target.get(track.key));
                    }
                }
            }

            let spec = &active.spec;
            let (progress, done) = match spec.repeat {
                Repeat::Once if spec.duration <= 0.0 => (1.0, true),
                Repeat::Once => {
                    let p = local / spec.duration;
                    (p.min(1.0), p >= 1.0)
                }
                Repeat::Forever if spec.duration <= 0.0 => (1.0, false),
                Repeat::Forever => (local.rem_euclid(spec.duration) / spec.duration, false),
            };

            let eased = spec.ease.apply(progress);
            for track in &spec.tracks {
                let from = track.from.unwrap_or(track.to);
                target.set(track.key, from + (track.to - from) * eased);
            }

            if done {
                let late = (local - spec.duration).max(0.0);
                if let Some(Active {
                    spec:
                        TweenSpec {
                            on_complete: Some(cue),
                            ..
                        },
                    ..
                }) = self.retire(index)
                {
                    fired.push(Fired { cue, late });
                }
            }
        }
        fired
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
