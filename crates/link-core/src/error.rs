use thiserror::Error;

/// Rejected `SceneConfig` values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("particle count must be non-zero")]
    EmptyField,
    #[error("beam cap must be at least 1")]
    ZeroBeamCap,
    #[error("beam cap {cap} exceeds the maximum of {max}")]
    BeamCapTooLarge { cap: usize, max: usize },
    #[error("beam decay must lie strictly between 0 and 1, got {value}")]
    DecayOutOfRange { value: f32 },
    #[error("{name} must lie in [0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f32 },
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("{name} must be finite and non-negative, got {value}")]
    Negative { name: &'static str, value: f32 },
}

/// Failure to deliver a notice into a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("scene has been torn down")]
    SceneClosed,
}
