use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use soporte_core::Outcome;
use soporte_core::session::SessionStore;
use soporte_infrastructure::{ConfigStorage, FileSessionStore};
use soporte_interaction::BackendClient;
use std::path::PathBuf;
use std::sync::Arc;

mod commands;

use commands::{AdminAction, AuthAction, ChatAction, FeedbackAction, RecursoAction};

#[derive(Parser)]
#[command(name = "soporte")]
#[command(about = "Soporte CLI - talk to the Growing Soporte support backend", long_about = None)]
struct Cli {
    /// Backend base URL (overrides SOPORTE_API_URL and config.toml)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Use this config file instead of the default one
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use this session file instead of the default one
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    /// Log requests to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Login, registration and profile
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Messages and conversations
    Chat {
        #[command(subcommand)]
        action: ChatAction,
    },
    /// Users, analytics and document upload
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Resource management
    Recursos {
        #[command(subcommand)]
        action: RecursoAction,
    },
    /// Conversation feedback
    Feedback {
        #[command(subcommand)]
        action: FeedbackAction,
    },
    /// Print the resolved configuration
    Config,
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(default))
        .context("Invalid log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let storage = match &cli.config {
        Some(path) => ConfigStorage::with_path(path.clone()),
        None => ConfigStorage::new_default()?,
    };
    let mut config = storage
        .load_with_env()
        .with_context(|| format!("Failed to load {}", storage.path().display()))?;
    if let Some(url) = cli.api_url {
        config.base_url = url;
    }
    tracing::debug!(
        "[CLI] Config from {}, backend {}",
        storage.path().display(),
        config.base_url
    );

    let resolved = serde_json::json!({
        "configFile": storage.path(),
        "config": &config,
    });

    let store: Arc<dyn SessionStore> = match cli.session_file {
        Some(path) => Arc::new(FileSessionStore::with_path(path)),
        None => Arc::new(FileSessionStore::new_default()?),
    };
    let client = BackendClient::new(config, store).context("Failed to create backend client")?;

    let outcome = match cli.command {
        Commands::Auth { action } => commands::auth::run(&client, action).await?,
        Commands::Chat { action } => commands::chat::run(&client, action).await?,
        Commands::Admin { action } => commands::admin::run(&client, action).await?,
        Commands::Recursos { action } => commands::recursos::run(&client, action).await?,
        Commands::Feedback { action } => commands::feedback::run(&client, action).await?,
        Commands::Config => Outcome::with("resolved", resolved),
    };

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    if !outcome.success {
        std::process::exit(1);
    }
    Ok(())
}
