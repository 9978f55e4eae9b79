//! Particle visualization of simplified atomic structure.
//!
//! Each electron is resampled every frame from an approximate radial and
//! angular probability density (s/p/d shapes), keeping a short trail of past
//! positions for the renderer.

pub mod atom;
pub mod config;
pub mod electron;
pub mod elements;
pub mod error;
pub mod orbital;
pub mod sampling;
pub mod scene;
pub mod simulation;
pub mod vector;

pub use atom::{build_atom, electron_shells_for_z, Atom, Nucleus};
pub use config::AppConfig;
pub use electron::{AtomId, Electron};
pub use error::{AtomError, ConfigError, SamplingError};
pub use orbital::OrbitalKind;
pub use sampling::{AngularSampler, OrbitalSampler, RadialSampler, SamplerConfig};
pub use simulation::{FrameSnapshot, SimulationState};
pub use vector::Vector3;

/// Initialise `env_logger` with an `info` default filter.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
