pub mod admin;
pub mod auth;
pub mod chat;
pub mod feedback;
pub mod recursos;

pub use admin::AdminAction;
pub use auth::AuthAction;
pub use chat::ChatAction;
pub use feedback::FeedbackAction;
pub use recursos::RecursoAction;

use anyhow::{Context, Result};
use serde_json::Value;
use soporte_core::Outcome;
use soporte_interaction::UploadFile;
use std::path::Path;

/// Parses a JSON argument. `@path` reads the JSON from a file.
pub fn json_arg(raw: &str) -> Result<Value> {
    let text = match raw.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path))?,
        None => raw.to_string(),
    };
    serde_json::from_str(&text).context("Argument is not valid JSON")
}

/// Reads a file to upload, or the failure outcome to report instead.
pub async fn read_upload(path: &Path) -> std::result::Result<UploadFile, Outcome> {
    UploadFile::from_path(path)
        .await
        .map_err(|e| Outcome::failure(&e))
}
