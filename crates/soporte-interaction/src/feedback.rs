//! Feedback endpoints.

use crate::client::{Access, BackendClient, list_of};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use soporte_core::{Result, messages};

impl BackendClient {
    pub async fn submit_feedback<T>(&self, feedback: &T) -> Result<Value>
    where
        T: Serialize + ?Sized,
    {
        let envelope = self
            .call(
                Method::POST,
                &["feedback"],
                Access::Bearer,
                messages::FEEDBACK_SUBMIT_FAILED,
                |req| req.json(feedback),
            )
            .await?;

        Ok(envelope.field_or_payload("feedback"))
    }

    pub async fn load_feedback(&self) -> Result<Vec<Value>> {
        let envelope = self
            .call(
                Method::GET,
                &["feedback"],
                Access::Bearer,
                messages::FEEDBACK_LOAD_FAILED,
                |req| req,
            )
            .await?;

        Ok(list_of(Some(envelope.field_or_payload("feedback"))))
    }

    pub async fn get_conversation_feedback(&self, conversation_id: &str) -> Result<Value> {
        let envelope = self
            .call(
                Method::GET,
                &["feedback", "conversation", conversation_id],
                Access::Bearer,
                messages::FEEDBACK_LOAD_FAILED,
                |req| req,
            )
            .await?;

        Ok(envelope.field_or_payload("feedback"))
    }

    pub async fn get_feedback_stats(&self) -> Result<Value> {
        let envelope = self
            .call(
                Method::GET,
                &["feedback", "stats"],
                Access::Bearer,
                messages::FEEDBACK_STATS_FAILED,
                |req| req,
            )
            .await?;

        Ok(envelope.field_or_payload("stats"))
    }
}
