//! Client configuration file storage.
//!
//! Resolution order, highest first:
//! 1. Environment variables (`SOPORTE_API_URL`, `SOPORTE_TIMEOUT_SECS`)
//! 2. `config.toml` in the Soporte config directory
//! 3. Built-in defaults

use super::atomic_toml::{AtomicTomlError, AtomicTomlFile};
use crate::paths::{PathError, SoportePaths};
use soporte_core::ClientConfig;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_API_URL: &str = "SOPORTE_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "SOPORTE_TIMEOUT_SECS";

/// Errors that can occur while resolving the client configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("Failed to read config file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: AtomicTomlError,
    },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

/// Loads and saves `config.toml`.
pub struct ConfigStorage {
    file: AtomicTomlFile<ClientConfig>,
}

impl ConfigStorage {
    /// Storage at the default location (`<config_dir>/soporte/config.toml`).
    pub fn new_default() -> Result<Self, ConfigError> {
        Ok(Self::with_path(SoportePaths::config_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Loads the file alone. A missing or empty file yields the defaults.
    pub fn load(&self) -> Result<ClientConfig, ConfigError> {
        let loaded = self.file.load().map_err(|source| ConfigError::File {
            path: self.file.path().to_path_buf(),
            source,
        })?;
        Ok(loaded.unwrap_or_default())
    }

    /// Loads the file and applies process environment overrides.
    pub fn load_with_env(&self) -> Result<ClientConfig, ConfigError> {
        let config = self.load()?;
        apply_overrides(config, |key| env::var(key).ok())
    }

    pub fn save(&self, config: &ClientConfig) -> Result<(), ConfigError> {
        self.file.save(config).map_err(|source| ConfigError::File {
            path: self.file.path().to_path_buf(),
            source,
        })
    }
}

/// Applies overrides from `lookup` (normally the process environment).
///
/// Blank values are ignored.
pub fn apply_overrides(
    mut config: ClientConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ClientConfig, ConfigError> {
    let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(url) = lookup(ENV_API_URL) {
        tracing::debug!("[Config] base_url overridden by {}", ENV_API_URL);
        config.base_url = url.trim().to_string();
    }

    if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
        let secs = raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidValue {
                key: ENV_TIMEOUT_SECS,
                value: raw.clone(),
            })?;
        config.timeout_secs = Some(secs);
    }

    Ok(config)
}
