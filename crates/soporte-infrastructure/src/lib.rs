//! Storage for the Soporte client: config and session files on disk, plus
//! an in-memory session store for tests and embedding hosts.

pub mod paths;
pub mod storage;

pub use crate::paths::{PathError, SoportePaths};
pub use crate::storage::{
    ConfigError, ConfigStorage, ENV_API_URL, ENV_TIMEOUT_SECS, FileSessionStore,
    MemorySessionStore, apply_overrides,
};
