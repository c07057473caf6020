//! HTTP client for the Soporte backend.
//!
//! [`BackendClient`] wraps every backend endpoint the support pages use.
//! Operations are grouped by endpoint family:
//!
//! - `auth`: login, registration, profile, password
//! - `chat`: messages and conversations
//! - `admin`: users, analytics, document upload
//! - `resources`: resource CRUD and PDF text extraction
//! - `feedback`: feedback submission and statistics
//!
//! # Usage
//!
//! ```ignore
//! use soporte_core::ClientConfig;
//! use soporte_infrastructure::FileSessionStore;
//! use soporte_interaction::{BackendClient, SendMessage};
//! use std::sync::Arc;
//!
//! let store = Arc::new(FileSessionStore::new_default()?);
//! let client = BackendClient::new(ClientConfig::default(), store)?;
//! client.login("ana@example.com", "secret").await?;
//! let reply = client.send_message(&SendMessage::new("Hola")).await?;
//! ```

mod admin;
pub mod auth;
pub mod chat;
mod client;
mod feedback;
pub mod resources;
mod session_state;
pub mod upload;

pub use chat::{ConversationPage, DEFAULT_PAGE_LIMIT, SendMessage, SentMessage};
pub use client::BackendClient;
pub use resources::{PdfExtraction, ResourcePage, ResourceQuery};
pub use upload::UploadFile;
