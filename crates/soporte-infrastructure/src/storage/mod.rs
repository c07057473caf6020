//! Storage layer: atomic files and session stores.

mod atomic_toml;
mod config_storage;
mod file_session_store;
mod memory_session_store;

pub use atomic_toml::{AtomicTomlError, AtomicTomlFile};
pub use config_storage::{
    ConfigError, ConfigStorage, ENV_API_URL, ENV_TIMEOUT_SECS, apply_overrides,
};
pub use file_session_store::FileSessionStore;
pub use memory_session_store::MemorySessionStore;
