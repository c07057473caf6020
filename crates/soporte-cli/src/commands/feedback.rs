use super::json_arg;
use anyhow::Result;
use clap::Subcommand;
use soporte_core::Outcome;
use soporte_interaction::BackendClient;

#[derive(Subcommand)]
pub enum FeedbackAction {
    /// Submit feedback as a JSON object (or @file)
    Submit { feedback: String },
    /// List all feedback
    List,
    /// Feedback left on one conversation
    Conversation { id: String },
    Stats,
}

pub async fn run(client: &BackendClient, action: FeedbackAction) -> Result<Outcome> {
    let outcome = match action {
        FeedbackAction::Submit { feedback } => Outcome::from_result(
            client.submit_feedback(&json_arg(&feedback)?).await,
            "feedback",
        ),
        FeedbackAction::List => Outcome::from_result(client.load_feedback().await, "feedback"),
        FeedbackAction::Conversation { id } => Outcome::from_result(
            client.get_conversation_feedback(&id).await,
            "feedback",
        ),
        FeedbackAction::Stats => Outcome::from_result(client.get_feedback_stats().await, "stats"),
    };
    Ok(outcome)
}
