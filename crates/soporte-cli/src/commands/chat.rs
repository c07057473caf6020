use super::read_upload;
use anyhow::Result;
use clap::Subcommand;
use soporte_core::Outcome;
use soporte_interaction::{BackendClient, DEFAULT_PAGE_LIMIT, SendMessage};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum ChatAction {
    /// Send a message to the assistant
    Send {
        message: String,
        /// Continue this conversation instead of the current one
        #[arg(long)]
        conversation: Option<String>,
        /// Start a new conversation
        #[arg(long, conflicts_with = "conversation")]
        new: bool,
        /// Attach an image
        #[arg(long)]
        image: Option<PathBuf>,
        #[arg(long)]
        category: Option<String>,
    },
    /// List conversations
    List {
        #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Show one conversation with its messages
    Show { id: String },
    Rename { id: String, title: String },
    Category { id: String, category: String },
    Delete { id: String },
    /// Search conversations by text
    Search { query: String },
    /// Rate a conversation from 1 to 5
    Rate {
        id: String,
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,
        #[arg(long)]
        feedback: Option<String>,
    },
}

pub async fn run(client: &BackendClient, action: ChatAction) -> Result<Outcome> {
    let outcome = match action {
        ChatAction::Send {
            message,
            conversation,
            new,
            image,
            category,
        } => {
            let mut request = SendMessage::new(message);
            let conversation = if new {
                None
            } else {
                conversation.or_else(|| client.current_conversation_id())
            };
            if let Some(id) = conversation {
                request = request.in_conversation(id);
            }
            if let Some(path) = image {
                match read_upload(&path).await {
                    Ok(file) => {
                        request = request.with_image(file.to_base64(), file.mime_type);
                    }
                    Err(outcome) => return Ok(outcome),
                }
            }
            if let Some(category) = category {
                request = request.with_category(category);
            }
            Outcome::from_result(client.send_message(&request).await, "")
        }
        ChatAction::List { limit, offset } => {
            Outcome::from_result(client.load_conversations(limit, offset).await, "")
        }
        ChatAction::Show { id } => {
            Outcome::from_result(client.load_conversation(&id).await, "conversation")
        }
        ChatAction::Rename { id, title } => Outcome::from_result(
            client.rename_conversation(&id, &title).await,
            "conversation",
        ),
        ChatAction::Category { id, category } => Outcome::from_result(
            client.update_conversation_category(&id, &category).await,
            "conversation",
        ),
        ChatAction::Delete { id } => Outcome::from_result(client.delete_conversation(&id).await, ""),
        ChatAction::Search { query } => Outcome::from_result(
            client.search_conversations(&query).await,
            "conversations",
        ),
        ChatAction::Rate {
            id,
            rating,
            feedback,
        } => Outcome::from_result(
            client
                .rate_conversation(&id, rating, feedback.as_deref())
                .await,
            "rating",
        ),
    };
    Ok(outcome)
}
