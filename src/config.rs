//! Application configuration, loaded from JSON.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::electron::TRAIL_CAPACITY;
use crate::elements;
use crate::error::ConfigError;
use crate::sampling::SamplerConfig;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "ELECTRON_CLOUD_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: "Electron Cloud".to_string(),
            width: 1100,
            height: 700,
            fps: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomSpec {
    pub symbol: String,
    pub position: [f32; 2],
}

impl AtomSpec {
    pub fn new(symbol: &str, x: f32, y: f32) -> Self {
        AtomSpec {
            symbol: symbol.to_string(),
            position: [x, y],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub atoms: Vec<AtomSpec>,
    pub sampler: SamplerConfig,
    pub trail_length: usize,
    /// Fixed RNG seed; entropy-seeded when absent.
    pub seed: Option<u64>,
    /// Display color overrides keyed by element symbol.
    pub colors: HashMap<String, [u8; 3]>,
    pub server: ServerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            window: WindowConfig::default(),
            atoms: vec![
                AtomSpec::new("H", 550.0, 250.0),
                AtomSpec::new("Be", 700.0, 350.0),
                AtomSpec::new("O", 400.0, 350.0),
            ],
            sampler: SamplerConfig::default(),
            trail_length: TRAIL_CAPACITY,
            seed: None,
            colors: HashMap::new(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Config from the first CLI argument, else `$ELECTRON_CLOUD_CONFIG`,
    /// else defaults.
    pub fn from_args_or_env() -> Result<Self, ConfigError> {
        let path = std::env::args()
            .nth(1)
            .or_else(|| std::env::var(CONFIG_ENV).ok());
        match path {
            Some(p) => {
                log::info!("loading config from {p}");
                Self::load(p)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.window;
        if w.width == 0 || w.height == 0 {
            return Err(ConfigError::Invalid("window size must be non-zero".into()));
        }
        if w.fps == 0 {
            return Err(ConfigError::Invalid("fps must be non-zero".into()));
        }
        if self.trail_length == 0 {
            return Err(ConfigError::Invalid("trail_length must be at least 1".into()));
        }

        let s = &self.sampler;
        for (name, value) in [
            ("bohr_base", s.bohr_base),
            ("cutoff_factor", s.cutoff_factor),
            ("proposal_factor", s.proposal_factor),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "sampler.{name} must be positive, got {value}"
                )));
            }
        }
        if s.max_radial_attempts == 0 || s.max_angular_attempts == 0 {
            return Err(ConfigError::Invalid(
                "sampler attempt caps must be non-zero".into(),
            ));
        }

        for atom in &self.atoms {
            elements::lookup(&atom.symbol)?;
            if !atom.position.iter().all(|c| c.is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "position of {} is not finite",
                    atom.symbol
                )));
            }
        }
        Ok(())
    }

    /// Display color for `symbol`, honoring overrides.
    pub fn color_for(&self, symbol: &str) -> [u8; 3] {
        self.colors
            .get(symbol)
            .copied()
            .unwrap_or_else(|| elements::color_for(symbol))
    }

    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.window.fps.max(1) as f64)
    }
}
