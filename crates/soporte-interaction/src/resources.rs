//! Resource ("recurso") management.

use crate::client::{Access, BackendClient, list_of};
use crate::upload::UploadFile;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use soporte_core::{ClientError, Result, messages};

/// Filters and pagination for the resource list. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourcePage {
    pub recursos: Vec<Value>,
    pub pagination: Value,
}

/// Text the backend extracted from an uploaded PDF.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PdfExtraction {
    pub text: String,
    pub pages: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PdfUploadRequest<'a> {
    file_name: &'a str,
    file_data: String,
}

fn recurso_path(id: &str) -> [&str; 2] {
    ["recursos", id]
}

impl BackendClient {
    pub async fn load_recursos(&self, query: &ResourceQuery) -> Result<ResourcePage> {
        let mut envelope = self
            .call(
                Method::GET,
                &["recursos"],
                Access::Bearer,
                messages::RESOURCES_LOAD_FAILED,
                |req| req.query(query),
            )
            .await?;

        Ok(ResourcePage {
            recursos: list_of(envelope.take_field("recursos")),
            pagination: envelope.take_field("pagination").unwrap_or(Value::Null),
        })
    }

    pub async fn get_recurso(&self, id: &str) -> Result<Value> {
        let envelope = self
            .call(
                Method::GET,
                &recurso_path(id),
                Access::Bearer,
                messages::RESOURCE_LOAD_FAILED,
                |req| req,
            )
            .await?;

        Ok(envelope.field_or_payload("recurso"))
    }

    pub async fn create_recurso<T>(&self, recurso: &T) -> Result<Value>
    where
        T: Serialize + ?Sized,
    {
        let envelope = self
            .call(
                Method::POST,
                &["recursos"],
                Access::Bearer,
                messages::RESOURCE_CREATE_FAILED,
                |req| req.json(recurso),
            )
            .await?;

        Ok(envelope.field_or_payload("recurso"))
    }

    pub async fn update_recurso<T>(&self, id: &str, recurso: &T) -> Result<Value>
    where
        T: Serialize + ?Sized,
    {
        let envelope = self
            .call(
                Method::PUT,
                &recurso_path(id),
                Access::Bearer,
                messages::RESOURCE_UPDATE_FAILED,
                |req| req.json(recurso),
            )
            .await?;

        Ok(envelope.field_or_payload("recurso"))
    }

    pub async fn delete_recurso(&self, id: &str) -> Result<()> {
        self.call(
            Method::DELETE,
            &recurso_path(id),
            Access::Bearer,
            messages::RESOURCE_DELETE_FAILED,
            |req| req,
        )
        .await
        .map(|_| ())
    }

    /// Sends a PDF as base64 JSON and returns the text extracted from it.
    pub async fn upload_pdf(&self, file: &UploadFile) -> Result<PdfExtraction> {
        // Fail before encoding when there is no session to send it with.
        if self.token().is_none() {
            return Err(ClientError::NotAuthenticated);
        }

        let body = PdfUploadRequest {
            file_name: &file.file_name,
            file_data: file.to_base64(),
        };

        let mut envelope = self
            .call(
                Method::POST,
                &["recursos", "upload-pdf"],
                Access::Bearer,
                messages::PDF_UPLOAD_FAILED,
                |req| req.json(&body),
            )
            .await?;

        let text = envelope
            .take_field("text")
            .and_then(|text| text.as_str().map(str::to_string))
            .unwrap_or_default();
        let pages = envelope
            .take_field("pages")
            .or_else(|| envelope.take_field("numPages"))
            .and_then(|pages| pages.as_u64())
            .unwrap_or(0);

        Ok(PdfExtraction { text, pages })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_skips_unset_filters() {
        let query = ResourceQuery {
            categoria: Some("legal".into()),
            limit: Some(10),
            ..ResourceQuery::default()
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"categoria": "legal", "limit": 10})
        );
    }

    #[test]
    fn test_pdf_request_shape() {
        let body = PdfUploadRequest {
            file_name: "manual.pdf",
            file_data: "QUJD".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"fileName": "manual.pdf", "fileData": "QUJD"})
        );
    }
}
