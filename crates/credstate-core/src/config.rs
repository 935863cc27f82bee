// Rust guideline compliant 2026-02-06

//! Configuration management for credstate.

use crate::store::DEFAULT_CAPACITY;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "credstate.toml";

/// Configuration for the credential state engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Initial bucket count of the credential store.
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,

    /// Number of services returned by default rankings.
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
}

/// Default initial capacity of the credential store.
fn default_initial_capacity() -> usize {
    DEFAULT_CAPACITY
}

/// Default ranking length.
fn default_top_n() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: default_initial_capacity(),
            default_top_n: default_top_n(),
        }
    }
}

impl Config {
    /// Loads configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file at `<config_dir>/credstate.toml`
    /// 3. Environment variables with `CREDSTATE_` prefix
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file exists but cannot be read
    /// - Configuration file contains invalid TOML
    /// - Configuration values fail validation
    pub fn load(config_dir: &Path) -> Result<Self> {
        let mut config = Self::default();

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            config = toml::from_str(&content)
                .map_err(|e| Error::InvalidConfig(format!("Invalid config file: {}", e)))?;
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `CREDSTATE_INITIAL_CAPACITY` - Initial store capacity (> 0)
    /// - `CREDSTATE_DEFAULT_TOP_N` - Default ranking length (> 0)
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("CREDSTATE_INITIAL_CAPACITY") {
            self.initial_capacity = val.parse().map_err(|_| {
                Error::InvalidConfig(
                    "CREDSTATE_INITIAL_CAPACITY must be a positive number".to_string(),
                )
            })?;
        }

        if let Ok(val) = std::env::var("CREDSTATE_DEFAULT_TOP_N") {
            self.default_top_n = val.parse().map_err(|_| {
                Error::InvalidConfig("CREDSTATE_DEFAULT_TOP_N must be a positive number".to_string())
            })?;
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if `initial_capacity` or `default_top_n` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(Error::InvalidConfig(
                "initial_capacity must be greater than 0".to_string(),
            ));
        }

        if self.default_top_n == 0 {
            return Err(Error::InvalidConfig(
                "default_top_n must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Saves the configuration to `<config_dir>/credstate.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save(&self, config_dir: &Path) -> Result<()> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::InvalidConfig(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}
