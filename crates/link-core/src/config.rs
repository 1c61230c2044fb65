//! Scene configuration.
//!
//! Every field defaults to the matching constant in `constants.rs`. The
//! values are read once when a `Scene` is built; there is no runtime
//! reconfiguration.

use crate::constants::*;
use crate::error::ConfigError;
use rand::prelude::*;
use std::time::Duration;

/// Independent random streams derived from one base seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Stream {
    Pulse = 0,
    Particles = 1,
    Beams = 2,
    TriggerTimer = 3,
}

/// Tunables for a scene.
///
/// - `particle_count`: size of the particle set, fixed for the scene lifetime
/// - `speed_gain`: how strongly pressure accelerates the fall
/// - `scale_gain` / `shrink_gain`: how strongly pressure stretches and thins particles
/// - `smoothing_alpha`: responsiveness of pressure to new load
/// - `normalization`: arrivals per frame that map to a pressure target of 1
/// - `beam_cap`: max concurrent beams, at most `BEAM_CAP_MAX`
/// - `beam_decay`: per-frame opacity multiplier, strictly inside (0, 1)
/// - `burst_probability` / `burst_size`: synthetic load of the pulse source
/// - `trigger_period` / `trigger_probability`: probabilistic beam timer
/// - `seed`: base seed; `None` draws one from entropy
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub particle_count: usize,
    pub speed_gain: f32,
    pub scale_gain: f32,
    pub shrink_gain: f32,
    pub smoothing_alpha: f32,
    pub normalization: f32,
    pub beam_cap: usize,
    pub beam_decay: f32,
    pub burst_probability: f32,
    pub burst_size: u32,
    pub trigger_period: Duration,
    pub trigger_probability: f32,
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            speed_gain: SPEED_GAIN,
            scale_gain: SCALE_GAIN,
            shrink_gain: SHRINK_GAIN,
            smoothing_alpha: PRESSURE_ALPHA,
            normalization: PRESSURE_NORMALIZATION,
            beam_cap: BEAM_CAP,
            beam_decay: BEAM_DECAY,
            burst_probability: BURST_PROBABILITY,
            burst_size: BURST_SIZE,
            trigger_period: Duration::from_millis(BEAM_TRIGGER_PERIOD_MS as u64),
            trigger_probability: BEAM_TRIGGER_PROBABILITY,
            seed: None,
        }
    }
}

impl SceneConfig {
    /// Default configuration with a fixed base seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::EmptyField);
        }
        if self.beam_cap == 0 {
            return Err(ConfigError::ZeroBeamCap);
        }
        if self.beam_cap > BEAM_CAP_MAX {
            return Err(ConfigError::BeamCapTooLarge {
                cap: self.beam_cap,
                max: BEAM_CAP_MAX,
            });
        }
        unit_range("smoothing_alpha", self.smoothing_alpha)?;
        // 1.0 would never fade and 0.0 would vanish on the first frame
        if !(self.beam_decay > 0.0 && self.beam_decay < 1.0) {
            return Err(ConfigError::DecayOutOfRange {
                value: self.beam_decay,
            });
        }
        unit_range("burst_probability", self.burst_probability)?;
        unit_range("trigger_probability", self.trigger_probability)?;
        positive("normalization", self.normalization)?;
        non_negative("speed_gain", self.speed_gain)?;
        non_negative("scale_gain", self.scale_gain)?;
        non_negative("shrink_gain", self.shrink_gain)?;
        Ok(())
    }
}

fn unit_range(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { name, value })
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

/// Derive a per-stream RNG from the base seed so streams can be reseeded independently.
pub(crate) fn stream_rng(base_seed: u64, stream: Stream) -> StdRng {
    let mix = base_seed ^ (stream as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    StdRng::seed_from_u64(mix)
}
