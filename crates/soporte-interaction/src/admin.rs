//! Administrative queries and document upload.

use crate::client::{Access, BackendClient, list_of};
use crate::upload::UploadFile;
use reqwest::Method;
use serde_json::Value;
use soporte_core::{Result, messages};

impl BackendClient {
    /// All users. Accepts both `{users}` and `{data: {users}}` responses.
    pub async fn load_users(&self) -> Result<Vec<Value>> {
        let mut envelope = self
            .call(
                Method::GET,
                &["admin", "users"],
                Access::Bearer,
                messages::USERS_LOAD_FAILED,
                |req| req,
            )
            .await?;

        Ok(list_of(envelope.take_field("users")))
    }

    pub async fn get_analytics(&self) -> Result<Value> {
        let envelope = self
            .call(
                Method::GET,
                &["admin", "analytics"],
                Access::Bearer,
                messages::ANALYTICS_LOAD_FAILED,
                |req| req,
            )
            .await?;

        Ok(envelope.field_or_payload("analytics"))
    }

    /// Uploads a knowledge-base document as multipart form data.
    ///
    /// Returns the id the backend assigned to the document.
    pub async fn upload_document(&self, file: &UploadFile, category: &str) -> Result<Value> {
        let form = file.to_form("document", &[("category", category)])?;

        let mut envelope = self
            .call(
                Method::POST,
                &["admin", "documents", "upload"],
                Access::Bearer,
                messages::DOCUMENT_UPLOAD_FAILED,
                |req| req.multipart(form),
            )
            .await?;

        Ok(envelope.take_field("documentId").unwrap_or(Value::Null))
    }
}
