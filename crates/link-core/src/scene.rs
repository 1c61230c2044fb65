//! Per-frame scheduler and the simulation context it owns.
//!
//! A `Scene` holds every piece of mutable simulation state. Each call to
//! `tick` runs one frame in a fixed order:
//!
//! 1. drain the inbox and sample the pulse source
//! 2. update pressure
//! 3. advance the particle field with the pressure from step 2
//! 4. apply queued beam triggers, then decay every beam
//! 5. hand out an immutable snapshot
//!
//! Particles always see the pressure computed in the same tick.

use crate::beams::{Beam, BeamPool};
use crate::config::{stream_rng, SceneConfig, Stream};
use crate::error::ConfigError;
use crate::link::{inbox, ChanceTimer, SceneInbox, SceneLink};
use crate::particles::{FieldParams, ParticleField, ParticleInstance};
use crate::pressure::PressureEstimator;
use crate::pulse::PulseSource;

/// Read-only view of one frame, for the renderer.
#[derive(Clone, Copy, Debug)]
pub struct FrameSnapshot<'a> {
    pub frame: u64,
    pub pressure: f32,
    pub particles: &'a [ParticleInstance],
    /// Changes exactly once per tick; compare against the last uploaded value.
    pub particle_generation: u64,
    pub beams: &'a [Beam],
}

pub struct Scene {
    config: SceneConfig,
    base_seed: u64,
    pulse: PulseSource,
    pressure: PressureEstimator,
    field: ParticleField,
    beams: BeamPool,
    inbox: SceneInbox,
    link: SceneLink,
    frame: u64,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let base_seed = config.seed.unwrap_or_else(rand::random);
        let mut particle_rng = stream_rng(base_seed, Stream::Particles);
        let field = ParticleField::new(
            config.particle_count,
            FieldParams {
                speed_gain: config.speed_gain,
                scale_gain: config.scale_gain,
                shrink_gain: config.shrink_gain,
            },
            &mut particle_rng,
        );
        let (link, inbox) = inbox();
        log::info!(
            "[scene] particles={} beam_cap={} alpha={:.3} seed={}",
            config.particle_count,
            config.beam_cap,
            config.smoothing_alpha,
            base_seed
        );
        Ok(Self {
            pulse: PulseSource::new(
                config.burst_probability,
                config.burst_size,
                stream_rng(base_seed, Stream::Pulse),
            ),
            pressure: PressureEstimator::new(config.normalization, config.smoothing_alpha),
            field,
            beams: BeamPool::new(
                config.beam_cap,
                config.beam_decay,
                stream_rng(base_seed, Stream::Beams),
            ),
            inbox,
            link,
            config,
            base_seed,
            frame: 0,
        })
    }

    /// Sending handle for external timers and the live-update channel.
    pub fn link(&self) -> SceneLink {
        self.link.clone()
    }

    /// Beam timer seeded from this scene's base seed.
    pub fn trigger_timer(&self) -> ChanceTimer {
        ChanceTimer::new(
            self.config.trigger_period,
            self.config.trigger_probability,
            stream_rng(self.base_seed, Stream::TriggerTimer),
        )
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    #[inline]
    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[inline]
    pub fn pressure(&self) -> f32 {
        self.pressure.value()
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn beams(&self) -> &BeamPool {
        &self.beams
    }

    /// Run one frame and return its snapshot.
    pub fn tick(&mut self) -> FrameSnapshot<'_> {
        let arrivals = self
            .pulse
            .sample()
            .saturating_add(self.inbox.drain_arrivals());
        let pressure = self.pressure.update(arrivals);
        self.field.advance(pressure);
        for trigger in self.inbox.drain_triggers() {
            let id = self.beams.trigger(trigger);
            log::debug!("[beams] triggered id={} frame={}", id, self.frame);
        }
        self.beams.decay();
        self.frame += 1;
        self.snapshot()
    }

    /// Snapshot of the last completed tick.
    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot {
            frame: self.frame,
            pressure: self.pressure.value(),
            particles: self.field.instances(),
            particle_generation: self.field.generation(),
            beams: self.beams.beams(),
        }
    }
}
