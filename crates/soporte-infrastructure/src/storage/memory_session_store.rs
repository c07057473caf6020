//! In-memory session store.

use soporte_core::session::{SessionKey, SessionStore, StoreError};
use std::collections::HashMap;
use std::sync::RwLock;

/// [`SessionStore`] that lives only as long as the process.
///
/// Used by tests and by hosts that must not write to disk.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: RwLock<HashMap<SessionKey, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds a key (builder style).
    pub fn with(self, key: SessionKey, value: impl Into<String>) -> Self {
        if let Ok(mut values) = self.values.write() {
            values.insert(key, value.into());
        }
        self
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.values.read().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Lock("session store lock poisoned".to_string())
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: SessionKey) -> Result<Option<String>, StoreError> {
        Ok(self.values.read().map_err(poisoned)?.get(&key).cloned())
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<(), StoreError> {
        self.values
            .write()
            .map_err(poisoned)?
            .insert(key, value.to_string());
        Ok(())
    }

    fn clear(&self, key: SessionKey) -> Result<(), StoreError> {
        self.values.write().map_err(poisoned)?.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_clear() {
        let store = MemorySessionStore::new();
        store.set(SessionKey::AuthToken, "T").unwrap();
        assert_eq!(store.get(SessionKey::AuthToken).unwrap().as_deref(), Some("T"));

        store.clear(SessionKey::AuthToken).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_seeded_values() {
        let store = MemorySessionStore::new()
            .with(SessionKey::User, "{not json")
            .with(SessionKey::CurrentConversation, "c1");
        assert_eq!(store.len(), 2);

        store.clear_all().unwrap();
        assert!(store.is_empty());
    }
}
