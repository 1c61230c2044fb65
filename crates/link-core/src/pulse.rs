use rand::prelude::*;

/// Synthetic bursty load: one observation per frame, either a full burst or nothing.
///
/// Memoryless on purpose. Its only job is to give the pressure estimator
/// something spiky to smooth.
pub struct PulseSource {
    probability: f32,
    burst: u32,
    rng: StdRng,
}

impl PulseSource {
    pub fn new(probability: f32, burst: u32, rng: StdRng) -> Self {
        Self {
            probability,
            burst,
            rng,
        }
    }

    /// Arrival count for the current frame.
    pub fn sample(&mut self) -> u32 {
        if self.probability > 0.0 && self.rng.gen::<f32>() < self.probability {
            log::debug!("[pulse] burst of {} arrivals", self.burst);
            self.burst
        } else {
            0
        }
    }
}
