mod config;

pub use config::Config;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/reroute[-dev]/` based on REROUTE_ENV.
///
/// Set REROUTE_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("REROUTE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("reroute-dev")
    } else {
        base_dir.join("reroute")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|err| ConfigError::DataDirUnavailable(err.to_string()))?;
    Ok(dir)
}
