//! Session store trait.
//!
//! Defines the interface for persisting the three session keys.

use super::model::SessionKey;
use thiserror::Error;

/// Errors raised by a [`SessionStore`] implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// File or device I/O failure.
    #[error("I/O error: {0}")]
    Io(String),

    /// The backing file exists but could not be decoded.
    #[error("Corrupted session file: {0}")]
    Corrupted(String),

    /// The advisory lock on the backing file could not be acquired.
    #[error("Lock error: {0}")]
    Lock(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(format!("{} (kind: {:?})", err, err.kind()))
    }
}

/// Key-value persistence for the session.
///
/// This is the only place the client touches persistent storage. Each key is
/// read, written and removed independently, and values are plain strings (the
/// user record is stored as JSON text).
///
/// # Implementation Notes
///
/// Operations are synchronous and expected to be short. Callers hold a lock
/// around them, so implementations should never block on the network.
pub trait SessionStore: Send + Sync {
    /// Reads the value under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))`: A value is stored
    /// - `Ok(None)`: Nothing is stored under the key
    /// - `Err(_)`: The store could not be read
    fn get(&self, key: SessionKey) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: SessionKey, value: &str) -> Result<(), StoreError>;

    /// Removes the value under `key`. Removing a missing key is not an error.
    fn clear(&self, key: SessionKey) -> Result<(), StoreError>;

    /// Removes every session key.
    fn clear_all(&self) -> Result<(), StoreError> {
        for key in SessionKey::ALL {
            self.clear(key)?;
        }
        Ok(())
    }
}

impl<S: SessionStore + ?Sized> SessionStore for std::sync::Arc<S> {
    fn get(&self, key: SessionKey) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn clear(&self, key: SessionKey) -> Result<(), StoreError> {
        (**self).clear(key)
    }

    fn clear_all(&self) -> Result<(), StoreError> {
        (**self).clear_all()
    }
}
