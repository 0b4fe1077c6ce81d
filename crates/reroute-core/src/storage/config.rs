//! TOML-based preference store.
//!
//! The onboarding flow persists exactly one durable flag: whether smart
//! pattern learning is enabled. Read at screen mount, written on toggle.
//!
//! Configuration is stored at `~/.config/reroute/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/reroute/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Smart pattern learning opt-in; proactive alerts for learned
    /// journeys.
    #[serde(default = "default_true")]
    pub smart_learning_enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            smart_learning_enabled: true,
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the default file on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Flip the learning flag and persist immediately.
    pub fn set_smart_learning(&mut self, enabled: bool) -> Result<(), ConfigError> {
        self.smart_learning_enabled = enabled;
        self.save()
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|err| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: err.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|err| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        std::fs::write(path, content).map_err(|err| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }
}
