use thiserror::Error;

/// Errors raised while building atoms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AtomError {
    #[error("unknown element symbol: {0:?}")]
    UnknownElement(String),
}

/// Which sampler ran out of attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingStage {
    Radial,
    Angular,
}

impl std::fmt::Display for SamplingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SamplingStage::Radial => f.write_str("radial"),
            SamplingStage::Angular => f.write_str("angular"),
        }
    }
}

/// A rejection loop hit its attempt cap.
///
/// Only the `try_*` sampler entry points return this; the regular ones
/// substitute a fallback value and log instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingError {
    #[error("{stage} sampling exhausted after {attempts} attempts")]
    Exhausted { stage: SamplingStage, attempts: u32 },
}

/// Errors while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error(transparent)]
    Atom(#[from] AtomError),
}
