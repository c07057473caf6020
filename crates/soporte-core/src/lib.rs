//! Domain layer of the Soporte backend client.
//!
//! Holds everything that does not touch the network or the file system:
//! the error taxonomy, the session model and its persistence trait, the host
//! navigation hooks, configuration and response envelope handling.

pub mod config;
pub mod envelope;
pub mod error;
pub mod messages;
pub mod navigator;
pub mod outcome;
pub mod session;

// Re-export common types
pub use config::ClientConfig;
pub use envelope::Envelope;
pub use error::{ClientError, Result};
pub use navigator::{HeadlessNavigator, Navigator};
pub use outcome::Outcome;
pub use session::{Session, SessionKey, SessionStore, StoreError, UserRecord};
