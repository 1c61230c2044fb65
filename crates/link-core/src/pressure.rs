/// Smoothed load scalar in \[0, 1\].
///
/// Each frame the value moves a fixed fraction `alpha` of the way toward the
/// target implied by that frame's arrivals, so bursty input never produces a
/// jump.
#[derive(Clone, Debug, PartialEq)]
pub struct PressureEstimator {
    value: f32,
    normalization: f32,
    alpha: f32,
}

impl PressureEstimator {
    pub fn new(normalization: f32, alpha: f32) -> Self {
        Self {
            value: 0.0,
            normalization,
            alpha,
        }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Fold one frame of arrivals into the estimate and return the new pressure.
    pub fn update(&mut self, arrivals: u32) -> f32 {
        self.value = update(arrivals, self.value, self.normalization, self.alpha);
        log::trace!("[pressure] arrivals={} p={:.4}", arrivals, self.value);
        self.value
    }
}

/// Pressure target for a frame: arrivals scaled by `normalization`, clamped to \[0, 1\].
#[inline]
pub fn target(arrivals: u32, normalization: f32) -> f32 {
    (arrivals as f32 / normalization).clamp(0.0, 1.0)
}

/// One exponential smoothing step toward the frame target.
///
/// The result is kept between `current` and the target, so it never
/// overshoots and stays in \[0, 1\] when `current` does.
pub fn update(arrivals: u32, current: f32, normalization: f32, alpha: f32) -> f32 {
    let target = target(arrivals, normalization);
    let next = current + alpha * (target - current);
    next.clamp(current.min(target), current.max(target))
}
