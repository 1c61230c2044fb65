//! The falling particle field.
//!
//! Particles never die: when one drops below the band it reappears at the
//! top with the same identity, speed, x and z. `advance` is a pure function
//! of the current pressure and the particle state; all randomness is spent
//! at construction.

use crate::color::pressure_color;
use crate::constants::*;
use glam::Vec3;
use rand::prelude::*;

/// One falling unit. `base_speed`, `position.x` and `position.z` are fixed at creation.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub base_speed: f32,
    pub position: Vec3,
}

impl Particle {
    fn random(rng: &mut impl Rng) -> Self {
        Self {
            base_speed: PARTICLE_SPEED_MIN + rng.gen::<f32>() * PARTICLE_SPEED_SPAN,
            position: Vec3::new(
                rng.gen_range(-FIELD_HALF_X..FIELD_HALF_X),
                rng.gen_range(-Y_MAX..Y_MAX),
                rng.gen_range(-FIELD_HALF_Z..FIELD_HALF_Z),
            ),
        }
    }
}

/// Renderer-visible per-particle record, laid out for direct upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    pub scale: [f32; 2],
    pub color: [f32; 3],
}

/// Gains applied to every particle each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldParams {
    pub speed_gain: f32,
    pub scale_gain: f32,
    pub shrink_gain: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            speed_gain: SPEED_GAIN,
            scale_gain: SCALE_GAIN,
            shrink_gain: SHRINK_GAIN,
        }
    }
}

/// Fixed-size particle set plus the instance buffer it writes every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleField {
    particles: Vec<Particle>,
    instances: Vec<ParticleInstance>,
    params: FieldParams,
    generation: u64,
}

impl ParticleField {
    pub fn new(count: usize, params: FieldParams, rng: &mut impl Rng) -> Self {
        let particles = (0..count).map(|_| Particle::random(rng)).collect();
        Self::from_particles(particles, params)
    }

    /// Build a field from explicit particles, clamping each into the wrap
    /// band. Negative or NaN speeds become 0 so particles only ever fall.
    /// The instance buffer starts populated for zero pressure.
    pub fn from_particles(mut particles: Vec<Particle>, params: FieldParams) -> Self {
        for p in &mut particles {
            p.position.y = if p.position.y.is_nan() {
                Y_MAX
            } else {
                p.position.y.clamp(-Y_MAX, Y_MAX)
            };
            p.base_speed = p.base_speed.max(0.0);
        }
        let mut field = Self {
            instances: vec![ParticleInstance::default(); particles.len()],
            particles,
            params,
            generation: 0,
        };
        field.write_instances(0.0);
        field
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn instances(&self) -> &[ParticleInstance] {
        &self.instances
    }

    /// Bumped once per `advance`; the renderer re-uploads when it changes.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Move every particle down by its pressure-scaled speed and rewrite the
    /// instance buffer. Pressure is clamped into [0, 1] first.
    pub fn advance(&mut self, pressure: f32) {
        let pressure = if pressure.is_nan() {
            0.0
        } else {
            pressure.clamp(0.0, 1.0)
        };
        let gain = (1.0 + pressure * self.params.speed_gain).max(0.0);
        for p in &mut self.particles {
            p.position.y -= p.base_speed * gain;
            if p.position.y < -Y_MAX {
                p.position.y = Y_MAX;
            }
        }
        self.write_instances(pressure);
        self.generation += 1;
    }

    fn write_instances(&mut self, pressure: f32) {
        // Scale and color depend only on pressure, so they are shared by the whole frame.
        let scale = [
            BASE_SCALE_X / (1.0 + pressure * self.params.shrink_gain),
            BASE_SCALE_Y + pressure * self.params.scale_gain,
        ];
        let color = pressure_color(pressure);
        for (inst, p) in self.instances.iter_mut().zip(&self.particles) {
            *inst = ParticleInstance {
                position: p.position.to_array(),
                scale,
                color,
            };
        }
    }
}
