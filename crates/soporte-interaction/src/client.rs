//! BackendClient - façade over the Soporte REST backend.
//!
//! Every operation is one HTTP round trip. Responses go through a single
//! pipeline ([`BackendClient::call`]) that:
//!
//! 1. Short-circuits authenticated calls when no token is held
//! 2. Maps transport failures to [`ClientError::Connection`]
//! 3. Invalidates the session on HTTP 401 and notifies the host
//! 4. Maps non-2xx and `success: false` bodies to [`ClientError::Backend`]
//! 5. Resolves the success body into an [`Envelope`]
//!
//! The operations themselves live in one module per endpoint family.

use crate::session_state::SessionState;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde_json::Value;
use soporte_core::envelope::{self, Envelope};
use soporte_core::navigator::{self, HeadlessNavigator, Navigator};
use soporte_core::session::{SessionStore, UserRecord};
use soporte_core::{ClientConfig, ClientError, Result, Session, messages};
use std::sync::Arc;

/// Whether a call needs the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    Public,
    Bearer,
}

/// Client for the Soporte backend.
///
/// Cheap to clone; clones share the session.
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    config: Arc<ClientConfig>,
    session: Arc<SessionState>,
    navigator: Arc<dyn Navigator>,
}

impl BackendClient {
    /// Creates a client, restoring the token persisted in `store`.
    pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::connection(format!("Failed to build HTTP client: {}", e)))?;

        tracing::debug!("[BackendClient] Using backend at {}", config.base_url);

        Ok(Self {
            http,
            config: Arc::new(config),
            session: Arc::new(SessionState::load(store)?),
            navigator: Arc::new(HeadlessNavigator),
        })
    }

    /// Sets the host hooks used when a session is rejected.
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ============================================================================
    // Session helpers
    // ============================================================================

    /// The bearer token currently held, if any.
    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    /// The stored user record. Corrupted data is removed and yields `None`.
    pub fn get_current_user(&self) -> Option<UserRecord> {
        self.session.current_user()
    }

    /// True iff a token is held and a readable user record is stored.
    pub fn is_authenticated(&self) -> bool {
        self.session.token().is_some() && self.session.current_user().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.session
            .current_user()
            .is_some_and(|user| user.is_admin())
    }

    pub fn current_conversation_id(&self) -> Option<String> {
        self.session.conversation_id()
    }

    pub fn set_current_conversation_id(&self, id: &str) -> Result<()> {
        self.session.set_conversation_id(id)
    }

    pub fn clear_current_conversation_id(&self) -> Result<()> {
        self.session.clear_conversation_id()
    }

    /// Full snapshot of the session as currently stored.
    pub fn session(&self) -> Session {
        self.session.snapshot()
    }

    /// Ends the session locally. No request is sent.
    pub fn logout(&self) -> Result<()> {
        self.session.invalidate()
    }

    /// Reacts to a rejected session: clears it and, unless the host already
    /// shows a login or registration view, tells the person and sends the
    /// host to the entry page.
    pub fn handle_unauthorized(&self) {
        if let Err(e) = self.session.invalidate() {
            tracing::warn!("[BackendClient] Failed to clear rejected session: {}", e);
        }
        self.redirect_to_entry();
    }

    fn redirect_to_entry(&self) {
        let on_auth_view = self
            .navigator
            .current_view()
            .is_some_and(|view| navigator::is_auth_view(&view, &self.config.auth_views));

        if on_auth_view {
            return;
        }

        self.navigator.notify(messages::SESSION_EXPIRED);
        self.navigator.navigate(&self.config.entry_page);
    }

    fn reject(&self, token: &str) {
        match self.session.invalidate_if_current(token) {
            Ok(true) => self.redirect_to_entry(),
            Ok(false) => {}
            Err(e) => {
                tracing::warn!("[BackendClient] Failed to clear rejected session: {}", e);
                self.redirect_to_entry();
            }
        }
    }

    /// The base URL with `segments` appended as encoded path segments.
    fn url_for(&self, segments: &[&str]) -> Result<Url> {
        let base = self.config.endpoint("");
        let mut url = Url::parse(&base)
            .map_err(|e| ClientError::connection(format!("Invalid base URL {}: {}", base, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::connection(format!("Base URL {} cannot take a path", base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn session_state(&self) -> &SessionState {
        &self.session
    }

    // ============================================================================
    // Request pipeline
    // ============================================================================

    /// Performs one round trip and resolves the success body.
    ///
    /// `segments` are appended to the base URL, each one percent-encoded.
    /// `fallback` is the message used when a failure carries no backend
    /// message. `build` adds query, body or form data to the request.
    pub(crate) async fn call<F>(
        &self,
        method: Method,
        segments: &[&str],
        access: Access,
        fallback: &'static str,
        build: F,
    ) -> Result<Envelope>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let path = format!("/{}", segments.join("/"));
        let token = match access {
            Access::Bearer => Some(self.session.token().ok_or_else(|| {
                tracing::debug!("[BackendClient] {} {} skipped: no session", method, path);
                ClientError::NotAuthenticated
            })?),
            Access::Public => None,
        };

        let mut request = self.http.request(method.clone(), self.url_for(segments)?);
        if let Some(token) = &token {
            request = request.bearer_auth(token);
        }
        let request = build(request);

        tracing::debug!("[BackendClient] {} {}", method, path);

        let response = request.send().await.map_err(|e| {
            tracing::warn!("[BackendClient] {} {} failed: {}", method, path, e);
            ClientError::connection(e.to_string())
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            if let Some(token) = &token {
                tracing::warn!("[BackendClient] {} {} rejected the session", method, path);
                self.reject(token);
                return Err(ClientError::Unauthorized);
            }
        }

        let text = response.text().await.map_err(|e| {
            tracing::warn!("[BackendClient] {} {}: unreadable body: {}", method, path, e);
            ClientError::connection(e.to_string())
        })?;

        let body: Option<Value> = if text.trim().is_empty() {
            Some(Value::Null)
        } else {
            serde_json::from_str(&text).ok()
        };

        resolve(status, body, fallback).inspect_err(|e| {
            tracing::debug!("[BackendClient] {} {} -> {}", method, path, e);
        })
    }
}

/// Maps a status and decoded body to the call result.
///
/// `body` is `None` when the body was not valid JSON.
pub(crate) fn resolve(status: StatusCode, body: Option<Value>, fallback: &str) -> Result<Envelope> {
    if !status.is_success() {
        let message = body
            .as_ref()
            .and_then(envelope::failure_message)
            .unwrap_or_else(|| fallback.to_string());
        return Err(ClientError::backend(status.as_u16(), message));
    }

    let body = body.ok_or_else(|| ClientError::connection("Response body is not valid JSON"))?;

    if envelope::success_flag(&body) == Some(false) {
        let message = envelope::failure_message(&body).unwrap_or_else(|| fallback.to_string());
        return Err(ClientError::backend(status.as_u16(), message));
    }

    Ok(Envelope::from_body(body))
}

/// Reads a JSON array, treating anything else as empty.
pub(crate) fn list_of(value: Option<Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}
