use super::{json_arg, read_upload};
use anyhow::Result;
use clap::Subcommand;
use soporte_core::Outcome;
use soporte_interaction::{BackendClient, ResourceQuery};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum RecursoAction {
    /// List resources
    List {
        #[arg(long)]
        categoria: Option<String>,
        #[arg(long)]
        tipo: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    Get { id: String },
    /// Create a resource from a JSON object (or @file)
    Create { recurso: String },
    /// Replace a resource with a JSON object (or @file)
    Update { id: String, recurso: String },
    Delete { id: String },
    /// Upload a PDF and print the extracted text
    UploadPdf { path: PathBuf },
}

pub async fn run(client: &BackendClient, action: RecursoAction) -> Result<Outcome> {
    let outcome = match action {
        RecursoAction::List {
            categoria,
            tipo,
            search,
            limit,
            offset,
        } => {
            let query = ResourceQuery {
                categoria,
                tipo,
                search,
                limit,
                offset,
            };
            Outcome::from_result(client.load_recursos(&query).await, "")
        }
        RecursoAction::Get { id } => Outcome::from_result(client.get_recurso(&id).await, "recurso"),
        RecursoAction::Create { recurso } => {
            Outcome::from_result(client.create_recurso(&json_arg(&recurso)?).await, "recurso")
        }
        RecursoAction::Update { id, recurso } => Outcome::from_result(
            client.update_recurso(&id, &json_arg(&recurso)?).await,
            "recurso",
        ),
        RecursoAction::Delete { id } => Outcome::from_result(client.delete_recurso(&id).await, ""),
        RecursoAction::UploadPdf { path } => match read_upload(&path).await {
            Ok(file) => Outcome::from_result(client.upload_pdf(&file).await, ""),
            Err(outcome) => outcome,
        },
    };
    Ok(outcome)
}
