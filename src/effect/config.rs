use std::io::Read;

use anyhow::Context;

use crate::foundation::{
    core::Range,
    error::{LivingError, LivingResult},
};

/// Tunables for a [`crate::LivingImage`]. Times are in seconds, lengths in pixels.
///
/// Every field has a default; JSON overrides only need to name what they change.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EffectConfig {
    /// Sampling cell edge in pixels. Must be > 0.
    pub grid: u32,
    /// Disc radius range, in surface pixels.
    pub point_radius: Range,
    /// Magnitude range of each drift leg's offset (sign is random per axis).
    pub drift_offset: Range,
    /// Duration range of one drift leg.
    pub drift_duration: Range,
    /// Orbit circle radius range.
    pub orbit_radius: Range,
    /// Orbit period range.
    pub orbit_duration: Range,
    /// Overshoot multiplier applied to the cover scale before the entrance.
    pub initial_scale: f64,
    /// Delay before the entrance fires.
    pub initial_delay: f64,
    /// Entrance duration (zoom and scatter-to-home).
    pub initial_duration: f64,
    /// Pause between a settled shuffle (or entrance) and the next shuffle.
    pub shuffle_delay: f64,
    /// Duration of one shuffle.
    pub shuffle_duration: f64,
    /// Seed for every random choice.
    pub seed: u64,
    /// Disc colour, straight RGBA8.
    pub point_color: [u8; 4],
    /// Background colour painted on clear; `None` leaves the surface transparent.
    pub clear_rgba: Option<[u8; 4]>,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            grid: 12,
            point_radius: Range::new(1.0, 3.5),
            drift_offset: Range::new(4.0, 8.0),
            drift_duration: Range::new(0.3, 1.0),
            orbit_radius: Range::new(4.0, 10.0),
            orbit_duration: Range::fixed(2.0),
            initial_scale: 2.0,
            initial_delay: 1.0,
            initial_duration: 2.0,
            shuffle_delay: 5.0,
            shuffle_duration: 1.0,
            seed: 0x5EED_1A7E,
            point_color: [0x48, 0xA0, 0xDB, 0xFF],
            clear_rgba: None,
        }
    }
}

impl EffectConfig {
    /// Parse JSON overrides on top of the defaults.
    pub fn from_json_str(s: &str) -> LivingResult<Self> {
        let cfg: Self = serde_json::from_str(s).context("parse effect config JSON")?;
        Ok(cfg)
    }

    /// Parse JSON overrides from a reader.
    pub fn from_json_reader(r: impl Read) -> LivingResult<Self> {
        let cfg: Self = serde_json::from_reader(r).context("parse effect config JSON")?;
        Ok(cfg)
    }

    /// Reject configurations that would break sampling or timing.
    pub fn validate(&self) -> LivingResult<()> {
        if self.grid == 0 {
            return Err(LivingError::validation("grid must be > 0"));
        }

        self.point_radius.validate("point_radius", true)?;
        self.drift_offset.validate("drift_offset", true)?;
        self.drift_duration.validate("drift_duration", true)?;
        self.orbit_radius.validate("orbit_radius", true)?;
        self.orbit_duration.validate("orbit_duration", true)?;

        if !self.initial_scale.is_finite() || self.initial_scale <= 0.0 {
            return Err(LivingError::validation("initial_scale must be finite and > 0"));
        }
        for (name, v) in [
            ("initial_delay", self.initial_delay),
            ("initial_duration", self.initial_duration),
            ("shuffle_delay", self.shuffle_delay),
            ("shuffle_duration", self.shuffle_duration),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(LivingError::validation(format!(
                    "{name} must be finite and >= 0 (got {v})"
                )));
            }
        }
        if self.shuffle_delay + self.shuffle_duration <= 0.0 {
            return Err(LivingError::validation(
                "shuffle_delay + shuffle_duration must be > 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effect/config.rs"]
mod tests;
