//! TOML file configuration for the demo binary.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pool settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolSettings {
    /// Declared entropy capacity in bits. The estimator saturates here.
    pub capacity_bits: u32,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self { capacity_bits: 256 }
    }
}

/// Accumulation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccumulateSettings {
    /// Whole bits of true entropy to gather before key derivation.
    pub target_bits: u32,
    /// Optional shell command whose hashed output is mixed into the
    /// pool before accumulation starts (uncounted).
    pub seed_command: Option<String>,
}

impl Default for AccumulateSettings {
    fn default() -> Self {
        Self {
            target_bits: 128,
            seed_command: None,
        }
    }
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Pool settings.
    #[serde(default)]
    pub pool: PoolSettings,
    /// Accumulation settings.
    #[serde(default)]
    pub accumulate: AccumulateSettings,
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// The declared pool capacity was zero.
    #[error("pool capacity must be nonzero")]
    InvalidCapacity,
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    /// The file did not parse as TOML.
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

impl FileConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool.capacity_bits == 0 {
            return Err(ConfigError::InvalidCapacity);
        }
        Ok(())
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config: FileConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
