//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: Session snapshot, user record and storage keys
//! - `store`: Persistence trait for the three session keys
//!
//! # Usage
//!
//! ```ignore
//! use soporte_core::session::{Session, SessionKey, SessionStore, UserRecord};
//! ```

mod model;
mod store;

// Re-export public API
pub use model::{ADMIN_ROLE, Session, SessionKey, UserRecord};
pub use store::{SessionStore, StoreError};
