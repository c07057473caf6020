use super::json_arg;
use anyhow::{Context, Result, bail};
use clap::Subcommand;
use serde_json::{Value, json};
use soporte_core::Outcome;
use soporte_interaction::BackendClient;
use soporte_interaction::auth::registration;
use std::io::{self, BufRead, IsTerminal, Write};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Log in and store the session
    Login {
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account and store the session
    Register {
        name: String,
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
        /// Extra registration fields as JSON (or @file)
        #[arg(long)]
        extra: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the stored session
    Status,
    /// Show the profile, or update it with a JSON object (or @file)
    Profile {
        #[arg(long)]
        update: Option<String>,
    },
    /// Change the password. Omitted values are read from stdin, one per line
    Password {
        #[arg(long)]
        current: Option<String>,
        #[arg(long)]
        new: Option<String>,
    },
}

pub async fn run(client: &BackendClient, action: AuthAction) -> Result<Outcome> {
    let outcome = match action {
        AuthAction::Login { email, password } => {
            let password = secret(password, "Password")?;
            Outcome::from_result(client.login(&email, &password).await, "user")
        }
        AuthAction::Register {
            name,
            email,
            password,
            extra,
        } => {
            let password = secret(password, "Password")?;
            let mut body = registration(&name, &email, &password);
            if let Some(extra) = extra {
                merge(&mut body, json_arg(&extra)?);
            }
            Outcome::from_result(client.register(&body).await, "user")
        }
        AuthAction::Logout => Outcome::from_result(client.logout(), ""),
        AuthAction::Status => {
            let session = client.session();
            Outcome::from_result(
                Ok(json!({
                    "authenticated": client.is_authenticated(),
                    "admin": client.is_admin(),
                    "user": session.user,
                    "currentConversationId": session.current_conversation_id,
                })),
                "",
            )
        }
        AuthAction::Profile { update: None } => {
            Outcome::from_result(client.load_profile().await, "user")
        }
        AuthAction::Profile {
            update: Some(profile),
        } => Outcome::from_result(client.update_profile(&json_arg(&profile)?).await, "user"),
        AuthAction::Password { current, new } => {
            let current = secret(current, "Current password")?;
            let new = secret(new, "New password")?;
            Outcome::from_result(client.change_password(&current, &new).await, "")
        }
    };
    Ok(outcome)
}

/// `value`, or one line read from stdin. The prompt goes to stderr and only
/// when stdin is a terminal.
fn secret(value: Option<String>, prompt: &str) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprint!("{}: ", prompt);
        io::stderr().flush()?;
    }
    read_secret(&mut stdin.lock(), prompt)
}

fn read_secret(reader: &mut impl BufRead, prompt: &str) -> Result<String> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .with_context(|| format!("Failed to read {}", prompt.to_lowercase()))?;
    let secret = line.trim_end_matches(['\r', '\n']);
    if secret.is_empty() {
        bail!("{} is required", prompt);
    }
    Ok(secret.to_string())
}

/// Copies the keys of `extra` into `body` when both are objects.
fn merge(body: &mut Value, extra: Value) {
    if let (Value::Object(body), Value::Object(extra)) = (body, extra) {
        body.extend(extra);
    }
}
