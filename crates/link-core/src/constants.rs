// Simulation tuning constants shared by the core and the front-end.

// Particle field
pub const PARTICLE_COUNT: usize = 500;
pub const PARTICLE_SPEED_MIN: f32 = 0.05; // world units per frame
pub const PARTICLE_SPEED_SPAN: f32 = 0.2; // base speed drawn from [min, min + span)

// Half extents of the particle volume; Y is the wrap band [-Y_MAX, Y_MAX]
pub const FIELD_HALF_X: f32 = 20.0;
pub const Y_MAX: f32 = 20.0;
pub const FIELD_HALF_Z: f32 = 7.5;

// Pressure response of a particle
pub const SPEED_GAIN: f32 = 15.0; // full pressure falls 16x faster
pub const BASE_SCALE_X: f32 = 0.2;
pub const BASE_SCALE_Y: f32 = 0.5;
pub const SCALE_GAIN: f32 = 20.0; // vertical stretch at full pressure
pub const SHRINK_GAIN: f32 = 3.0; // width divisor growth at full pressure

// Two-regime palette (HSL, all in 0..1)
pub const ALERT_THRESHOLD: f32 = 0.4;
pub const CALM_HUE: f32 = 0.6;
pub const CALM_LIGHTNESS_BASE: f32 = 0.3;
pub const ALERT_HUE_START: f32 = 0.8; // magenta at the threshold
pub const ALERT_HUE_END: f32 = 0.97; // close to red at full pressure
pub const ALERT_LIGHTNESS_BASE: f32 = 0.5;
pub const ALERT_LIGHTNESS_SPAN: f32 = 0.5;

// Pressure estimator
pub const PRESSURE_NORMALIZATION: f32 = 10.0; // arrivals per frame mapped to target 1.0
pub const PRESSURE_ALPHA: f32 = 0.05; // new = old + α * (target - old)

// Event pulse source
pub const BURST_PROBABILITY: f32 = 0.05;
pub const BURST_SIZE: u32 = 20;

// Beam pool
pub const BEAM_CAP: usize = 5;
pub const BEAM_CAP_MAX: usize = 64; // upper bound accepted by SceneConfig::validate
pub const BEAM_DECAY: f32 = 0.92;
pub const BEAM_INITIAL_OPACITY: f32 = 0.8;
pub const BEAM_HALF_X: f32 = 10.0; // random endpoints in [-10, 10) x [-5, 5)
pub const BEAM_HALF_Y: f32 = 5.0;
pub const BEAM_ARC_LIFT: f32 = 2.0; // z of the curve apex
pub const BEAM_VISIBILITY_THRESHOLD: f32 = 0.01;

// Probabilistic beam trigger timer
pub const BEAM_TRIGGER_PERIOD_MS: u32 = 2000;
pub const BEAM_TRIGGER_PROBABILITY: f32 = 0.3;
