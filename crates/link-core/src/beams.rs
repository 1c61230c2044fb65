//! Transient trajectory beams.
//!
//! The pool keeps the most recent `cap` beams in creation order. Opacity
//! decays geometrically every frame but never causes removal; only the cap
//! evicts.

use crate::constants::*;
use glam::{Vec2, Vec3};
use rand::prelude::*;
use smallvec::SmallVec;

/// Sampled beam curve. Sized for the default tube resolution without spilling.
pub type BeamPath = SmallVec<[Vec3; 24]>;

/// One directional light trail. Only `opacity` changes after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct Beam {
    pub id: u64,
    pub start: Vec2,
    pub end: Vec2,
    opacity: f32,
}

impl Beam {
    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Whether the beam is still bright enough to draw.
    #[inline]
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.opacity >= threshold
    }

    /// Start, lifted midpoint and end of the beam arc.
    pub fn control_points(&self) -> [Vec3; 3] {
        let mid = (self.start + self.end) * 0.5;
        [
            self.start.extend(0.0),
            mid.extend(BEAM_ARC_LIFT),
            self.end.extend(0.0),
        ]
    }

    /// Sample the arc as an open Catmull-Rom curve through the control
    /// points, returning `segments + 1` points from start to end.
    pub fn path(&self, segments: usize) -> BeamPath {
        let segments = segments.max(1);
        let [c0, c1, c2] = self.control_points();
        // Reflected phantoms keep the end tangents pointing along the arc.
        let before = 2.0 * c0 - c1;
        let after = 2.0 * c2 - c1;
        (0..=segments)
            .map(|i| {
                let x = i as f32 / segments as f32 * 2.0;
                let span = (x.floor() as usize).min(1);
                let u = x - span as f32;
                if span == 0 {
                    catmull_rom(before, c0, c1, c2, u)
                } else {
                    catmull_rom(c0, c1, c2, after, u)
                }
            })
            .collect()
    }
}

#[inline]
fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, u: f32) -> Vec3 {
    let u2 = u * u;
    let u3 = u2 * u;
    0.5 * ((2.0 * p1)
        + (p2 - p0) * u
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * u2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * u3)
}

/// Request for a new beam, usually coming from the live-update channel.
///
/// `endpoints: None` (or any non-finite coordinate) means the sender had no
/// usable payload; the pool then picks random endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BeamTrigger {
    pub endpoints: Option<[Vec2; 2]>,
}

impl BeamTrigger {
    pub fn between(start: Vec2, end: Vec2) -> Self {
        Self {
            endpoints: Some([start, end]),
        }
    }

    fn valid_endpoints(&self) -> Option<[Vec2; 2]> {
        self.endpoints.filter(|[a, b]| a.is_finite() && b.is_finite())
    }
}

/// Bounded FIFO of beams with per-frame opacity decay.
pub struct BeamPool {
    beams: Vec<Beam>,
    cap: usize,
    decay: f32,
    next_id: u64,
    rng: StdRng,
}

impl BeamPool {
    pub fn new(cap: usize, decay: f32, rng: StdRng) -> Self {
        Self {
            beams: Vec::with_capacity(cap.saturating_add(1).min(BEAM_CAP_MAX + 1)),
            cap: cap.max(1),
            decay,
            next_id: 1,
            rng,
        }
    }

    pub fn beams(&self) -> &[Beam] {
        &self.beams
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.beams.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.beams.is_empty()
    }

    #[inline]
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Append a beam and evict the oldest past the cap. Returns the new beam's id.
    pub fn trigger(&mut self, trigger: BeamTrigger) -> u64 {
        let [start, end] = match trigger.valid_endpoints() {
            Some(ends) => ends,
            None => {
                if trigger.endpoints.is_some() {
                    log::debug!("[beams] non-finite endpoints, using random ones");
                }
                [self.random_point(), self.random_point()]
            }
        };
        let id = self.next_id;
        self.next_id += 1;
        self.beams.push(Beam {
            id,
            start,
            end,
            opacity: BEAM_INITIAL_OPACITY,
        });
        if self.beams.len() > self.cap {
            let excess = self.beams.len() - self.cap;
            self.beams.drain(..excess);
            log::debug!("[beams] evicted {} beam(s), newest id={}", excess, id);
        }
        id
    }

    /// Fade every beam by the decay factor. Called once per frame.
    pub fn decay(&mut self) {
        for b in &mut self.beams {
            b.opacity *= self.decay;
        }
    }

    /// Beams at or above `threshold` opacity, oldest first.
    pub fn visible(&self, threshold: f32) -> impl Iterator<Item = &Beam> + '_ {
        self.beams.iter().filter(move |b| b.is_visible(threshold))
    }

    fn random_point(&mut self) -> Vec2 {
        Vec2::new(
            self.rng.gen_range(-BEAM_HALF_X..BEAM_HALF_X),
            self.rng.gen_range(-BEAM_HALF_Y..BEAM_HALF_Y),
        )
    }
}
