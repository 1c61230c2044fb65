//! Message channels from external timers into a scene.
//!
//! Timers and the live-update channel never touch simulation state
//! directly. They send notices through a `SceneLink`; the scene drains them
//! once at the start of each tick.

use crate::beams::BeamTrigger;
use crate::error::LinkError;
use rand::prelude::*;
use smallvec::SmallVec;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;

/// Cloneable sending side of a scene's inbox.
#[derive(Clone, Debug)]
pub struct SceneLink {
    arrivals: Sender<u32>,
    triggers: Sender<BeamTrigger>,
}

impl SceneLink {
    /// Report arrivals observed outside the frame loop; they count toward the next tick.
    pub fn push_arrivals(&self, count: u32) -> Result<(), LinkError> {
        self.arrivals
            .send(count)
            .map_err(|_| LinkError::SceneClosed)
    }

    /// Request a beam on the next tick.
    pub fn trigger(&self, trigger: BeamTrigger) -> Result<(), LinkError> {
        self.triggers
            .send(trigger)
            .map_err(|_| LinkError::SceneClosed)
    }
}

/// Receiving side, owned by the scene.
pub(crate) struct SceneInbox {
    arrivals: Receiver<u32>,
    triggers: Receiver<BeamTrigger>,
}

impl SceneInbox {
    /// Sum of all arrivals queued since the last drain.
    pub(crate) fn drain_arrivals(&self) -> u32 {
        self.arrivals
            .try_iter()
            .fold(0u32, |acc, n| acc.saturating_add(n))
    }

    pub(crate) fn drain_triggers(&self) -> SmallVec<[BeamTrigger; 4]> {
        self.triggers.try_iter().collect()
    }
}

pub(crate) fn inbox() -> (SceneLink, SceneInbox) {
    let (arrivals_tx, arrivals_rx) = channel();
    let (triggers_tx, triggers_rx) = channel();
    (
        SceneLink {
            arrivals: arrivals_tx,
            triggers: triggers_tx,
        },
        SceneInbox {
            arrivals: arrivals_rx,
            triggers: triggers_rx,
        },
    )
}

/// Periodic coin flip: the host fires it every `period`, and each firing
/// succeeds with `probability`.
pub struct ChanceTimer {
    period: Duration,
    probability: f32,
    rng: StdRng,
}

impl ChanceTimer {
    pub fn new(period: Duration, probability: f32, rng: StdRng) -> Self {
        Self {
            period,
            probability,
            rng,
        }
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// One timer firing. True when the event should be emitted.
    pub fn roll(&mut self) -> bool {
        self.probability > 0.0 && self.rng.gen::<f32>() < self.probability
    }
}
