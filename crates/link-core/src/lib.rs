pub mod beams;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod link;
pub mod particles;
pub mod pressure;
pub mod pulse;
pub mod scene;

pub use beams::*;
pub use config::SceneConfig;
pub use constants::*;
pub use error::*;
pub use link::{ChanceTimer, SceneLink};
pub use particles::*;
pub use pressure::PressureEstimator;
pub use pulse::PulseSource;
pub use scene::*;
