//! Conversations and messaging.

use crate::client::{Access, BackendClient, list_of};
use crate::upload::strip_data_url;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use soporte_core::{Result, messages};

pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Body of a chat message.
///
/// Optional fields that are unset are left out of the JSON entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessage {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    /// Base64 image, without data-URL prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl SendMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn in_conversation(mut self, conversation_id: impl Into<String>) -> Self {
        self.conversation_id = Some(conversation_id.into());
        self
    }

    /// Attaches a base64 image. A `data:<mime>;base64,` prefix is removed.
    pub fn with_image(mut self, data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        let data = data.into();
        self.image_data = Some(strip_data_url(&data).to_string());
        self.image_mime_type = Some(mime_type.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// What the backend returns for a sent message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentMessage {
    pub conversation: Value,
    pub user_message: Value,
    pub bot_message: Value,
}

/// One page of the conversation list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationPage {
    pub conversations: Vec<Value>,
    pub pagination: Value,
}

#[derive(Debug, Serialize)]
struct RenameRequest<'a> {
    title: &'a str,
}

#[derive(Debug, Serialize)]
struct CategoryRequest<'a> {
    category: &'a str,
}

#[derive(Debug, Serialize)]
struct RateRequest<'a> {
    rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    feedback: Option<&'a str>,
}

/// The id of a conversation record (`id` or `_id`, string or number).
pub fn conversation_id_of(conversation: &Value) -> Option<String> {
    let id = conversation.get("id").or_else(|| conversation.get("_id"))?;
    match id {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn conversation_path(id: &str) -> [&str; 3] {
    ["chat", "conversation", id]
}

impl BackendClient {
    /// Sends a message; the conversation it lands in becomes the current one.
    pub async fn send_message(&self, message: &SendMessage) -> Result<SentMessage> {
        let mut envelope = self
            .call(
                Method::POST,
                &["chat", "message"],
                Access::Bearer,
                messages::SEND_MESSAGE_FAILED,
                |req| req.json(message),
            )
            .await?;

        let sent = SentMessage {
            conversation: envelope.take_field("conversation").unwrap_or(Value::Null),
            user_message: envelope.take_field("userMessage").unwrap_or(Value::Null),
            bot_message: envelope.take_field("botMessage").unwrap_or(Value::Null),
        };

        if let Some(id) = conversation_id_of(&sent.conversation) {
            if let Err(e) = self.set_current_conversation_id(&id) {
                tracing::warn!("[Chat] Failed to remember conversation {}: {}", id, e);
            }
        }

        Ok(sent)
    }

    pub async fn load_conversations(&self, limit: u32, offset: u32) -> Result<ConversationPage> {
        let mut envelope = self
            .call(
                Method::GET,
                &["chat", "conversations"],
                Access::Bearer,
                messages::CONVERSATIONS_LOAD_FAILED,
                |req| req.query(&[("limit", limit), ("offset", offset)]),
            )
            .await?;

        Ok(ConversationPage {
            conversations: list_of(envelope.take_field("conversations")),
            pagination: envelope.take_field("pagination").unwrap_or(Value::Null),
        })
    }

    pub async fn load_conversation(&self, id: &str) -> Result<Value> {
        let envelope = self
            .call(
                Method::GET,
                &conversation_path(id),
                Access::Bearer,
                messages::CONVERSATION_LOAD_FAILED,
                |req| req,
            )
            .await?;

        Ok(envelope.field_or_payload("conversation"))
    }

    pub async fn rename_conversation(&self, id: &str, title: &str) -> Result<Value> {
        let envelope = self
            .call(
                Method::PATCH,
                &conversation_path(id),
                Access::Bearer,
                messages::CONVERSATION_RENAME_FAILED,
                |req| req.json(&RenameRequest { title }),
            )
            .await?;

        Ok(envelope.field_or_payload("conversation"))
    }

    pub async fn update_conversation_category(&self, id: &str, category: &str) -> Result<Value> {
        let envelope = self
            .call(
                Method::PATCH,
                &conversation_path(id),
                Access::Bearer,
                messages::CONVERSATION_CATEGORY_FAILED,
                |req| req.json(&CategoryRequest { category }),
            )
            .await?;

        Ok(envelope.field_or_payload("conversation"))
    }

    /// Deletes a conversation, forgetting it if it was the current one.
    pub async fn delete_conversation(&self, id: &str) -> Result<()> {
        self.call(
            Method::DELETE,
            &conversation_path(id),
            Access::Bearer,
            messages::CONVERSATION_DELETE_FAILED,
            |req| req,
        )
        .await?;

        if self.current_conversation_id().as_deref() == Some(id) {
            self.clear_current_conversation_id()?;
        }
        Ok(())
    }

    pub async fn search_conversations(&self, query: &str) -> Result<Vec<Value>> {
        let envelope = self
            .call(
                Method::GET,
                &["chat", "search"],
                Access::Bearer,
                messages::CONVERSATION_SEARCH_FAILED,
                |req| req.query(&[("q", query)]),
            )
            .await?;

        Ok(list_of(Some(envelope.field_or_payload("conversations"))))
    }

    pub async fn rate_conversation(
        &self,
        id: &str,
        rating: u8,
        feedback: Option<&str>,
    ) -> Result<Value> {
        let envelope = self
            .call(
                Method::POST,
                &["chat", "conversation", id, "rate"],
                Access::Bearer,
                messages::CONVERSATION_RATE_FAILED,
                |req| req.json(&RateRequest { rating, feedback }),
            )
            .await?;

        Ok(envelope.into_payload())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_optionals_are_not_serialized() {
        let body = serde_json::to_value(SendMessage::new("hi")).unwrap();
        assert_eq!(body, json!({"message": "hi"}));
    }

    #[test]
    fn test_present_optionals_use_camel_case() {
        let body = serde_json::to_value(
            SendMessage::new("mira esto")
                .in_conversation("c1")
                .with_image("aGVsbG8=", "image/png")
                .with_category("ventas"),
        )
        .unwrap();
        assert_eq!(
            body,
            json!({
                "message": "mira esto",
                "conversationId": "c1",
                "imageData": "aGVsbG8=",
                "imageMimeType": "image/png",
                "category": "ventas",
            })
        );
    }

    #[test]
    fn test_image_data_url_prefix_is_removed() {
        let message = SendMessage::new("foto").with_image("data:image/png;base64,iVBORw0KGgo=", "image/png");
        assert_eq!(message.image_data.as_deref(), Some("iVBORw0KGgo="));
    }

    #[test]
    fn test_rate_request_omits_missing_feedback() {
        let body = serde_json::to_value(RateRequest {
            rating: 4,
            feedback: None,
        })
        .unwrap();
        assert_eq!(body, json!({"rating": 4}));
    }

    #[test]
    fn test_conversation_id_variants() {
        assert_eq!(conversation_id_of(&json!({"id": "abc"})), Some("abc".into()));
        assert_eq!(conversation_id_of(&json!({"_id": "mongo1"})), Some("mongo1".into()));
        assert_eq!(conversation_id_of(&json!({"id": 42})), Some("42".into()));
        assert_eq!(conversation_id_of(&json!({"id": ""})), None);
        assert_eq!(conversation_id_of(&Value::Null), None);
    }
}
