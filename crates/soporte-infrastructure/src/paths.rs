//! Path management for Soporte configuration and session files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/soporte/           # Config directory (platform equivalent elsewhere)
//! ├── config.toml              # Client configuration
//! └── session.toml             # Persisted session (token, user, conversation)
//! ```

use std::path::PathBuf;
use thiserror::Error;

const APP_DIR: &str = "soporte";

/// Errors that can occur during path resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Cannot find config directory")]
    ConfigDirNotFound,
}

pub struct SoportePaths;

impl SoportePaths {
    /// Returns the Soporte configuration directory (e.g. `~/.config/soporte/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path of the persisted session.
    ///
    /// The file holds a bearer token; it is written with the user's default
    /// permissions and should not be shared.
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("session.toml"))
    }
}
