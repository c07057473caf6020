//! Backend response envelope.
//!
//! The backend has answered in two shapes over its lifetime:
//!
//! ```text
//! { "success": true, "data": { "users": [...] } }   // wrapped
//! { "success": true, "users": [...] }               // legacy
//! ```
//!
//! A body is resolved into an [`Envelope`] once, at the client boundary, and
//! every field lookup goes through it.

use serde_json::{Map, Value};

/// A resolved success body.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// Payload lives under `data`.
    Wrapped(Value),
    /// Payload fields sit at the top level, next to `success`.
    Legacy(Map<String, Value>),
}

impl Envelope {
    /// Resolves a decoded response body.
    ///
    /// A top-level `data` key selects the wrapped shape. Anything else is
    /// legacy; its `success` and `message` keys are dropped from the payload.
    /// Non-object bodies are treated as a wrapped payload.
    pub fn from_body(body: Value) -> Self {
        match body {
            Value::Object(mut map) => {
                if let Some(data) = map.remove("data") {
                    Envelope::Wrapped(data)
                } else {
                    map.remove("success");
                    map.remove("message");
                    Envelope::Legacy(map)
                }
            }
            other => Envelope::Wrapped(other),
        }
    }

    /// Looks up a payload field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Envelope::Wrapped(data) => data.get(name),
            Envelope::Legacy(map) => map.get(name),
        }
    }

    /// Removes and returns a payload field.
    pub fn take_field(&mut self, name: &str) -> Option<Value> {
        match self {
            Envelope::Wrapped(Value::Object(map)) => map.remove(name),
            Envelope::Wrapped(_) => None,
            Envelope::Legacy(map) => map.remove(name),
        }
    }

    /// The named field if present, otherwise the whole payload.
    ///
    /// Used where the backend sometimes nests a record (`data.user`) and
    /// sometimes returns it bare (`data`).
    pub fn field_or_payload(self, name: &str) -> Value {
        let mut envelope = self;
        match envelope.take_field(name) {
            Some(value) => value,
            None => envelope.into_payload(),
        }
    }

    /// The whole payload as a JSON value.
    pub fn into_payload(self) -> Value {
        match self {
            Envelope::Wrapped(data) => data,
            Envelope::Legacy(map) => Value::Object(map),
        }
    }
}

/// The explicit `success` flag of a body, if it has one.
pub fn success_flag(body: &Value) -> Option<bool> {
    body.get("success").and_then(Value::as_bool)
}

/// The backend-supplied failure message, ignoring empty strings.
pub fn failure_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wrapped_and_legacy_resolve_to_same_field() {
        let wrapped = Envelope::from_body(json!({"success": true, "data": {"users": [1, 2]}}));
        let legacy = Envelope::from_body(json!({"success": true, "users": [1, 2]}));

        assert!(matches!(wrapped, Envelope::Wrapped(_)));
        assert!(matches!(legacy, Envelope::Legacy(_)));
        assert_eq!(wrapped.field("users"), Some(&json!([1, 2])));
        assert_eq!(legacy.field("users"), Some(&json!([1, 2])));
    }

    #[test]
    fn test_legacy_payload_drops_status_keys() {
        let legacy = Envelope::from_body(json!({"success": true, "message": "ok", "total": 4}));
        assert_eq!(legacy.into_payload(), json!({"total": 4}));
    }

    #[test]
    fn test_field_or_payload_prefers_field() {
        let nested = Envelope::from_body(json!({"data": {"user": {"id": 1}, "token": "T"}}));
        assert_eq!(nested.field_or_payload("user"), json!({"id": 1}));

        let bare = Envelope::from_body(json!({"data": {"id": 1, "role": "user"}}));
        assert_eq!(bare.field_or_payload("user"), json!({"id": 1, "role": "user"}));
    }

    #[test]
    fn test_non_object_body_is_wrapped() {
        let envelope = Envelope::from_body(json!([1, 2, 3]));
        assert_eq!(envelope.field("anything"), None);
        assert_eq!(envelope.into_payload(), json!([1, 2, 3]));
    }

    #[test]
    fn test_failure_message_ignores_blank() {
        assert_eq!(failure_message(&json!({"message": "  "})), None);
        assert_eq!(
            failure_message(&json!({"message": "Usuario no encontrado"})),
            Some("Usuario no encontrado".to_string())
        );
        assert_eq!(success_flag(&json!({"success": false})), Some(false));
        assert_eq!(success_flag(&json!({})), None);
    }
}
