//! Session state shared by every clone of a client.
//!
//! The in-memory token mirror and the persisted keys are only changed while
//! holding the mirror's mutex, so the two never disagree, even when a login
//! races an authenticated call that is being rejected. The lock is never held
//! across an `.await`.

use soporte_core::session::{SessionKey, SessionStore, StoreError, UserRecord};
use soporte_core::{ClientError, Result, Session};
use std::sync::{Arc, Mutex, MutexGuard};

pub(crate) struct SessionState {
    store: Arc<dyn SessionStore>,
    token: Mutex<Option<String>>,
}

impl SessionState {
    /// Initializes the mirror from the persisted token.
    ///
    /// A store that can no longer be decoded is wiped and yields an
    /// anonymous session.
    pub(crate) fn load(store: Arc<dyn SessionStore>) -> Result<Self> {
        let token = match store.get(SessionKey::AuthToken) {
            Ok(token) => token,
            Err(StoreError::Corrupted(detail)) => {
                tracing::warn!("[Session] Discarding corrupted session: {}", detail);
                store.clear_all()?;
                None
            }
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(
            "[Session] Loaded persisted session, token: {}",
            if token.is_some() { "present" } else { "none" }
        );
        Ok(Self {
            store,
            token: Mutex::new(token),
        })
    }

    fn mirror(&self) -> MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(crate) fn token(&self) -> Option<String> {
        self.mirror().clone()
    }

    /// Stores a freshly issued token and user record.
    ///
    /// If persisting fails, whatever was written is rolled back and the
    /// mirror is left empty.
    pub(crate) fn establish(&self, token: &str, user: &UserRecord) -> Result<()> {
        let user_json = serde_json::to_string(user)
            .map_err(|e| ClientError::Storage(format!("Failed to encode user: {}", e)))?;

        let mut mirror = self.mirror();
        let persisted = self
            .store
            .set(SessionKey::AuthToken, token)
            .and_then(|_| self.store.set(SessionKey::User, &user_json));

        match persisted {
            Ok(()) => {
                *mirror = Some(token.to_string());
                tracing::info!("[Session] Session established");
                Ok(())
            }
            Err(e) => {
                *mirror = None;
                if let Err(rollback) = self.store.clear_all() {
                    tracing::warn!("[Session] Rollback after failed login: {}", rollback);
                }
                Err(e.into())
            }
        }
    }

    /// Drops the session: every persisted key, then the mirror.
    ///
    /// If the store cannot be cleared the mirror keeps the token it holds.
    pub(crate) fn invalidate(&self) -> Result<()> {
        let mut mirror = self.mirror();
        self.store.clear_all()?;
        *mirror = None;
        tracing::info!("[Session] Session cleared");
        Ok(())
    }

    /// Drops the session only if `rejected` is still the held token.
    ///
    /// A rejection that arrives after a newer login belongs to the old
    /// session and must not log the new one out. Returns whether the session
    /// was cleared.
    pub(crate) fn invalidate_if_current(&self, rejected: &str) -> Result<bool> {
        let mut mirror = self.mirror();
        if mirror.as_deref() != Some(rejected) {
            tracing::debug!("[Session] Ignoring rejection of a superseded token");
            return Ok(false);
        }
        self.store.clear_all()?;
        *mirror = None;
        tracing::info!("[Session] Session cleared after rejection");
        Ok(true)
    }

    /// The persisted user record.
    ///
    /// Data that does not parse is removed and reported as no user.
    pub(crate) fn current_user(&self) -> Option<UserRecord> {
        let raw = match self.store.get(SessionKey::User) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("[Session] Failed to read stored user: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<UserRecord>(&raw) {
            Ok(user) if !user.as_value().is_null() => Some(user),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("[Session] Removing corrupted user record: {}", e);
                if let Err(e) = self.store.clear(SessionKey::User) {
                    tracing::warn!("[Session] Failed to remove corrupted user: {}", e);
                }
                None
            }
        }
    }

    pub(crate) fn store_user(&self, user: &UserRecord) -> Result<()> {
        let user_json = serde_json::to_string(user)
            .map_err(|e| ClientError::Storage(format!("Failed to encode user: {}", e)))?;
        let _mirror = self.mirror();
        self.store.set(SessionKey::User, &user_json)?;
        Ok(())
    }

    pub(crate) fn conversation_id(&self) -> Option<String> {
        self.store
            .get(SessionKey::CurrentConversation)
            .unwrap_or_else(|e| {
                tracing::warn!("[Session] Failed to read current conversation: {}", e);
                None
            })
    }

    pub(crate) fn set_conversation_id(&self, id: &str) -> Result<()> {
        let _mirror = self.mirror();
        self.store.set(SessionKey::CurrentConversation, id)?;
        Ok(())
    }

    pub(crate) fn clear_conversation_id(&self) -> Result<()> {
        let _mirror = self.mirror();
        self.store.clear(SessionKey::CurrentConversation)?;
        Ok(())
    }

    pub(crate) fn snapshot(&self) -> Session {
        Session {
            token: self.token(),
            user: self.current_user(),
            current_conversation_id: self.conversation_id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soporte_infrastructure::MemorySessionStore;

    /// Store whose removals always fail.
    struct StuckStore(MemorySessionStore);

    impl SessionStore for StuckStore {
        fn get(&self, key: SessionKey) -> std::result::Result<Option<String>, StoreError> {
            self.0.get(key)
        }

        fn set(&self, key: SessionKey, value: &str) -> std::result::Result<(), StoreError> {
            self.0.set(key, value)
        }

        fn clear(&self, _key: SessionKey) -> std::result::Result<(), StoreError> {
            Err(StoreError::Io("read-only".into()))
        }
    }

    /// Store whose token key cannot be decoded until it is cleared.
    struct DamagedStore {
        inner: MemorySessionStore,
        damaged: Mutex<bool>,
    }

    impl SessionStore for DamagedStore {
        fn get(&self, key: SessionKey) -> std::result::Result<Option<String>, StoreError> {
            if *self.damaged.lock().unwrap() {
                return Err(StoreError::Corrupted("bad toml".into()));
            }
            self.inner.get(key)
        }

        fn set(&self, key: SessionKey, value: &str) -> std::result::Result<(), StoreError> {
            self.inner.set(key, value)
        }

        fn clear(&self, key: SessionKey) -> std::result::Result<(), StoreError> {
            *self.damaged.lock().unwrap() = false;
            self.inner.clear(key)
        }
    }

    fn user() -> UserRecord {
        UserRecord::new(serde_json::json!({"id": 1, "role": "user"}))
    }

    #[test]
    fn test_failed_invalidate_keeps_mirror_and_store_in_step() {
        let state = SessionState::load(Arc::new(StuckStore(MemorySessionStore::new()))).unwrap();
        state.establish("T1", &user()).unwrap();

        assert!(state.invalidate().is_err());
        assert_eq!(state.token().as_deref(), Some("T1"));
        assert_eq!(state.store.get(SessionKey::AuthToken).unwrap().as_deref(), Some("T1"));

        assert!(state.invalidate_if_current("T1").is_err());
        assert_eq!(state.token().as_deref(), Some("T1"));
    }

    #[test]
    fn test_corrupted_store_loads_as_anonymous() {
        let store = Arc::new(DamagedStore {
            inner: MemorySessionStore::new().with(SessionKey::AuthToken, "stale"),
            damaged: Mutex::new(true),
        });

        let state = SessionState::load(store.clone()).unwrap();

        assert_eq!(state.token(), None);
        assert_eq!(store.get(SessionKey::AuthToken).unwrap(), None);
    }

    #[test]
    fn test_other_store_errors_still_fail_load() {
        struct Unreadable;
        impl SessionStore for Unreadable {
            fn get(&self, _key: SessionKey) -> std::result::Result<Option<String>, StoreError> {
                Err(StoreError::Io("permission denied".into()))
            }
            fn set(&self, _key: SessionKey, _value: &str) -> std::result::Result<(), StoreError> {
                Ok(())
            }
            fn clear(&self, _key: SessionKey) -> std::result::Result<(), StoreError> {
                Ok(())
            }
        }

        assert!(matches!(
            SessionState::load(Arc::new(Unreadable)),
            Err(ClientError::Storage(_))
        ));
    }
}
