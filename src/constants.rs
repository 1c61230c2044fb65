// Rendering and page-wiring constants for the web frontend.
// Simulation tuning lives in `link_core::constants`.

// Camera
pub const CAMERA_Z: f32 = 18.0;
pub const CAMERA_FOVY_DEG: f32 = 40.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Particle quad: base plane size before the per-particle pressure scale
pub const PARTICLE_QUAD_W: f32 = 0.05;
pub const PARTICLE_QUAD_H: f32 = 0.1;
pub const PARTICLE_OPACITY: f32 = 0.6; // additive, so this is also a brightness cap

// Beam tube approximation
pub const BEAM_SEGMENTS: usize = 20;
pub const BEAM_RADIUS: f32 = 0.05;
pub const BEAM_COLOR_SRGB: [f32; 3] = [1.0, 0.0, 0.5]; // #ff0080

// Background
pub const CLEAR_COLOR_SRGB: [f32; 3] = [0.0, 0.0, 0.02]; // #000005

// Instance buffer headroom: every particle plus every beam segment at full cap
pub const MAX_BEAM_INSTANCES: usize = link_core::BEAM_CAP * BEAM_SEGMENTS;

// DOM
pub const CANVAS_ID: &str = "link-canvas";

// Periodic debug stats in the frame loop
pub const STATS_LOG_INTERVAL_SEC: f32 = 5.0;
