//! File-backed session store.
//!
//! Keeps the three session keys in a single TOML file
//! (`~/.config/soporte/session.toml` by default).

use super::atomic_toml::AtomicTomlFile;
use crate::paths::{PathError, SoportePaths};
use serde::{Deserialize, Serialize};
use soporte_core::session::{SessionKey, SessionStore, StoreError};
use std::path::{Path, PathBuf};

/// On-disk layout of the session file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct SessionFile {
    #[serde(rename = "authToken", default, skip_serializing_if = "Option::is_none")]
    auth_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<String>,
    #[serde(
        rename = "currentConversationId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    current_conversation_id: Option<String>,
}

impl SessionFile {
    fn slot(&mut self, key: SessionKey) -> &mut Option<String> {
        match key {
            SessionKey::AuthToken => &mut self.auth_token,
            SessionKey::User => &mut self.user,
            SessionKey::CurrentConversation => &mut self.current_conversation_id,
        }
    }

    fn value(&self, key: SessionKey) -> Option<&String> {
        match key {
            SessionKey::AuthToken => self.auth_token.as_ref(),
            SessionKey::User => self.user.as_ref(),
            SessionKey::CurrentConversation => self.current_conversation_id.as_ref(),
        }
    }
}

/// [`SessionStore`] persisting to a TOML file.
///
/// Every `set`/`clear` is a locked, atomic read-modify-write, so several
/// processes can share one session file.
pub struct FileSessionStore {
    file: AtomicTomlFile<SessionFile>,
}

impl FileSessionStore {
    /// Store at the default location (`<config_dir>/soporte/session.toml`).
    pub fn new_default() -> Result<Self, PathError> {
        Ok(Self::with_path(SoportePaths::session_file()?))
    }

    /// Store at a custom path (for testing or per-profile sessions).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: SessionKey) -> Result<Option<String>, StoreError> {
        let file = self.file.load()?;
        Ok(file.and_then(|f| f.value(key).cloned()))
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<(), StoreError> {
        tracing::debug!("[FileSessionStore] set {}", key);
        self.file
            .update(SessionFile::default(), |f| *f.slot(key) = Some(value.to_string()))?;
        Ok(())
    }

    fn clear(&self, key: SessionKey) -> Result<(), StoreError> {
        if !self.file.path().exists() {
            return Ok(());
        }
        tracing::debug!("[FileSessionStore] clear {}", key);
        self.file.update(SessionFile::default(), |f| *f.slot(key) = None)?;
        Ok(())
    }

    fn clear_all(&self) -> Result<(), StoreError> {
        if !self.file.path().exists() {
            return Ok(());
        }
        tracing::debug!("[FileSessionStore] clear all keys");
        self.file
            .update(SessionFile::default(), |f| *f = SessionFile::default())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn store(temp_dir: &TempDir) -> FileSessionStore {
        FileSessionStore::with_path(temp_dir.path().join("session.toml"))
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        for key in SessionKey::ALL {
            assert_eq!(store.get(key).unwrap(), None);
        }
    }

    #[test]
    fn test_keys_are_independent() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);

        store.set(SessionKey::AuthToken, "T1").unwrap();
        store.set(SessionKey::User, r#"{"id":1,"role":"user"}"#).unwrap();
        store.set(SessionKey::CurrentConversation, "conv-9").unwrap();
        store.clear(SessionKey::User).unwrap();

        assert_eq!(store.get(SessionKey::AuthToken).unwrap().as_deref(), Some("T1"));
        assert_eq!(store.get(SessionKey::User).unwrap(), None);
        assert_eq!(
            store.get(SessionKey::CurrentConversation).unwrap().as_deref(),
            Some("conv-9")
        );
    }

    #[test]
    fn test_values_survive_a_new_handle() {
        let temp_dir = TempDir::new().unwrap();
        store(&temp_dir).set(SessionKey::AuthToken, "persisted").unwrap();

        let reopened = store(&temp_dir);
        assert_eq!(
            reopened.get(SessionKey::AuthToken).unwrap().as_deref(),
            Some("persisted")
        );
    }

    #[test]
    fn test_clear_all_empties_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        store.set(SessionKey::AuthToken, "T1").unwrap();
        store.set(SessionKey::CurrentConversation, "c").unwrap();

        store.clear_all().unwrap();

        for key in SessionKey::ALL {
            assert_eq!(store.get(key).unwrap(), None);
        }
    }

    #[test]
    fn test_clear_on_missing_file_creates_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        store.clear_all().unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupted_file_reports_then_recovers_on_write() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        fs::write(store.path(), "authToken = ").unwrap();

        assert!(matches!(
            store.get(SessionKey::AuthToken),
            Err(StoreError::Corrupted(_))
        ));

        store.set(SessionKey::AuthToken, "fresh").unwrap();
        assert_eq!(store.get(SessionKey::AuthToken).unwrap().as_deref(), Some("fresh"));
    }

    #[test]
    fn test_file_uses_storage_key_names() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        store.set(SessionKey::AuthToken, "T1").unwrap();
        store.set(SessionKey::CurrentConversation, "c1").unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.contains("authToken"));
        assert!(content.contains("currentConversationId"));
    }
}
