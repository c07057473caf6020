//! Error types for the Soporte client.

use crate::messages;
use crate::session::StoreError;
use thiserror::Error;

/// The single error type returned by every backend client operation.
///
/// Each variant corresponds to one failure class of a round trip. All of them
/// are recovered at the operation boundary; none should ever escape as a panic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The request never produced a usable response (transport failure,
    /// unreadable body, invalid JSON).
    #[error("Connection error: {detail}")]
    Connection { detail: String },

    /// The backend rejected the bearer token (HTTP 401). The session has
    /// already been invalidated when this is returned.
    #[error("Unauthorized: session rejected by backend")]
    Unauthorized,

    /// The backend answered with a non-2xx status or `success: false`.
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// The operation needs a session and none is held. No request was sent.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The persisted session could not be read or written.
    #[error("Session storage error: {0}")]
    Storage(String),

    /// A local file handed to an upload operation could not be read.
    #[error("File error: {path}: {message}")]
    File { path: String, message: String },
}

impl ClientError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Connection error
    pub fn connection(detail: impl Into<String>) -> Self {
        Self::Connection {
            detail: detail.into(),
        }
    }

    /// Creates a Backend error
    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        Self::Backend {
            status,
            message: message.into(),
        }
    }

    /// Creates a File error
    pub fn file(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::File {
            path: path.into(),
            message: message.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    pub fn is_not_authenticated(&self) -> bool {
        matches!(self, Self::NotAuthenticated)
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }

    /// Returns the HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Backend { status, .. } => Some(*status),
            Self::Unauthorized => Some(401),
            _ => None,
        }
    }

    /// The message a host should show to the person using it.
    ///
    /// Backend messages are passed through verbatim; every other class maps to
    /// a fixed localized string.
    pub fn user_message(&self) -> String {
        match self {
            Self::Connection { .. } => messages::CONNECTION_ERROR.to_string(),
            Self::Unauthorized => messages::SESSION_EXPIRED.to_string(),
            Self::Backend { message, .. } => message.clone(),
            Self::NotAuthenticated => messages::SESSION_MISSING.to_string(),
            Self::Storage(_) => messages::STORAGE_ERROR.to_string(),
            Self::File { .. } => messages::FILE_READ_ERROR.to_string(),
        }
    }
}

impl From<StoreError> for ClientError {
    fn from(err: StoreError) -> Self {
        Self::Storage(err.to_string())
    }
}

/// A type alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;
