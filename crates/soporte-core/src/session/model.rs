//! Session domain model.
//!
//! A session is the client-held triple of bearer token, user record and the
//! active conversation id. Each part is persisted under its own key.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role value the backend assigns to administrators.
pub const ADMIN_ROLE: &str = "admin";

/// The three independent keys a session is persisted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    /// Bearer token (plain string).
    AuthToken,
    /// User record (JSON-serialized).
    User,
    /// Id of the conversation currently open (plain string).
    CurrentConversation,
}

impl SessionKey {
    /// Every key, in the order they are cleared.
    pub const ALL: [SessionKey; 3] = [
        SessionKey::AuthToken,
        SessionKey::User,
        SessionKey::CurrentConversation,
    ];

    /// The storage name of the key.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKey::AuthToken => "authToken",
            SessionKey::User => "user",
            SessionKey::CurrentConversation => "currentConversationId",
        }
    }
}

impl std::fmt::Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque user record as returned by the backend.
///
/// Only the `role` field is ever inspected; everything else is carried
/// through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord(pub Value);

impl UserRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The user's role, when the record carries a string `role` field.
    pub fn role(&self) -> Option<&str> {
        self.0.get("role").and_then(Value::as_str)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(ADMIN_ROLE)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for UserRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Snapshot of the client session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserRecord>,
    pub current_conversation_id: Option<String>,
}

impl Session {
    /// An anonymous session: nothing held.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_anonymous(&self) -> bool {
        self.token.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_admin_role_detection() {
        assert!(UserRecord::new(json!({"id": 1, "role": "admin"})).is_admin());
        assert!(!UserRecord::new(json!({"id": 1, "role": "user"})).is_admin());
        assert!(!UserRecord::new(json!({"id": 1, "role": "Admin"})).is_admin());
        assert!(!UserRecord::new(json!({"id": 1})).is_admin());
        assert!(!UserRecord::new(json!({"role": 7})).is_admin());
    }

    #[test]
    fn test_user_record_serializes_transparently() {
        let record = UserRecord::new(json!({"id": 3, "role": "user", "name": "Ana"}));
        let text = serde_json::to_string(&record).unwrap();
        let back: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back, json!({"id": 3, "role": "user", "name": "Ana"}));
    }

    #[test]
    fn test_session_key_names() {
        assert_eq!(SessionKey::AuthToken.as_str(), "authToken");
        assert_eq!(SessionKey::User.as_str(), "user");
        assert_eq!(
            SessionKey::CurrentConversation.to_string(),
            "currentConversationId"
        );
    }

    #[test]
    fn test_default_session_is_anonymous() {
        assert!(Session::anonymous().is_anonymous());
    }
}
