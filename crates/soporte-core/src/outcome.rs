//! Uniform result shape for hosts.
//!
//! Hosts that cannot consume a Rust `Result` (the CLI, scripts reading its
//! output) get every operation's result as
//! `{ "success": bool, "error"?: string, ...payload }`.

use crate::error::ClientError;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Outcome {
    /// A success with no payload.
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
            payload: Map::new(),
        }
    }

    /// A success carrying `value` under `field`.
    pub fn with(field: &str, value: Value) -> Self {
        let mut outcome = Self::ok();
        outcome.payload.insert(field.to_string(), value);
        outcome
    }

    pub fn failure(error: &ClientError) -> Self {
        Self {
            success: false,
            error: Some(error.user_message()),
            payload: Map::new(),
        }
    }

    /// Converts an operation result, placing a success value under `field`.
    ///
    /// A success value that serializes to an object is flattened into the
    /// top level instead, and `null` / `()` adds nothing.
    pub fn from_result<T: Serialize>(result: Result<T, ClientError>, field: &str) -> Self {
        match result {
            Ok(value) => match serde_json::to_value(value) {
                Ok(Value::Null) => Self::ok(),
                Ok(Value::Object(map)) if field.is_empty() => Self {
                    success: true,
                    error: None,
                    payload: map,
                },
                Ok(value) => Self::with(field, value),
                Err(e) => Self::failure(&ClientError::connection(e.to_string())),
            },
            Err(error) => Self::failure(&error),
        }
    }
}
