//! Client configuration model.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Production backend.
pub const DEFAULT_BASE_URL: &str = "https://api.soporte.growinginmobiliario.com/api";
/// Page the host is sent to when the session is rejected.
pub const DEFAULT_ENTRY_PAGE: &str = "index.html";

/// Configuration of the backend client.
///
/// Every field has a default, so an empty `config.toml` is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to (no trailing slash needed).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Entry page the host navigates to after a rejected session.
    #[serde(default = "default_entry_page")]
    pub entry_page: String,

    /// Views that count as login/registration views. No redirect happens
    /// while one of them is shown.
    #[serde(default = "default_auth_views")]
    pub auth_views: Vec<String>,

    /// Per-request timeout in seconds. Unset means requests wait forever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_entry_page() -> String {
    DEFAULT_ENTRY_PAGE.to_string()
}

fn default_auth_views() -> Vec<String> {
    vec![
        DEFAULT_ENTRY_PAGE.to_string(),
        "login".to_string(),
        "register".to_string(),
    ]
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            entry_page: default_entry_page(),
            auth_views: default_auth_views(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Creates a default configuration pointing at `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Joins an endpoint path (starting with `/`) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
