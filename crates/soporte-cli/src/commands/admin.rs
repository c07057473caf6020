use super::read_upload;
use anyhow::Result;
use clap::Subcommand;
use soporte_core::Outcome;
use soporte_interaction::BackendClient;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum AdminAction {
    /// List all users
    Users,
    /// Show usage analytics
    Analytics,
    /// Upload a knowledge-base document
    Upload {
        path: PathBuf,
        #[arg(long, default_value = "general")]
        category: String,
    },
}

pub async fn run(client: &BackendClient, action: AdminAction) -> Result<Outcome> {
    let outcome = match action {
        AdminAction::Users => Outcome::from_result(client.load_users().await, "users"),
        AdminAction::Analytics => Outcome::from_result(client.get_analytics().await, "analytics"),
        AdminAction::Upload { path, category } => match read_upload(&path).await {
            Ok(file) => Outcome::from_result(
                client.upload_document(&file, &category).await,
                "documentId",
            ),
            Err(outcome) => outcome,
        },
    };
    Ok(outcome)
}
