//! Local files handed to upload operations.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::multipart::{Form, Part};
use soporte_core::{ClientError, Result};
use std::path::Path;

/// A file read fully into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Reads `path`; the MIME type is guessed from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ClientError::file(path.display().to_string(), e.to_string()))?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        tracing::debug!(
            "[Upload] Read {} ({} bytes, {})",
            file_name,
            bytes.len(),
            mime_type
        );

        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    pub fn from_bytes(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Standard base64 of the contents, without any data-URL prefix.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// A multipart part carrying the file under its name and MIME type.
    pub(crate) fn to_part(&self) -> Result<Part> {
        Part::bytes(self.bytes.clone())
            .file_name(self.file_name.clone())
            .mime_str(&self.mime_type)
            .map_err(|e| ClientError::file(self.file_name.clone(), e.to_string()))
    }

    /// A form with the file under `field` plus extra text fields.
    pub(crate) fn to_form(&self, field: &str, extra: &[(&str, &str)]) -> Result<Form> {
        let mut form = Form::new().part(field.to_string(), self.to_part()?);
        for (name, value) in extra {
            form = form.text(name.to_string(), value.to_string());
        }
        Ok(form)
    }
}

/// Strips a `data:<mime>;base64,` prefix, as produced by browser file readers.
pub fn strip_data_url(encoded: &str) -> &str {
    if encoded.starts_with("data:") {
        if let Some((_, data)) = encoded.split_once(',') {
            return data;
        }
    }
    encoded
}
