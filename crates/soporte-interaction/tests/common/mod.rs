//! In-process mock of the Soporte backend.
//!
//! Routes are registered as `(method, path) -> (status, body)`; every request
//! that reaches the server is recorded, matched or not.

#![allow(dead_code)]

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use soporte_core::ClientConfig;
use soporte_core::navigator::Navigator;
use soporte_core::session::SessionStore;
use soporte_infrastructure::MemorySessionStore;
use soporte_interaction::BackendClient;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Clone, Default)]
struct MockState {
    routes: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

pub struct MockBackend {
    state: MockState,
    pub base_url: String,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = MockState::default();
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            state,
            base_url: format!("http://{}/api", addr),
        }
    }

    /// Answers `method path` with `status` and a JSON body.
    pub fn on(&self, method: &str, path: &str, status: u16, body: Value) -> &Self {
        self.on_raw(method, path, status, &body.to_string())
    }

    /// Answers `method path` with `status` and a raw body.
    pub fn on_raw(&self, method: &str, path: &str, status: u16, body: &str) -> &Self {
        self.state.routes.lock().unwrap().insert(
            (method.to_string(), format!("/api{}", path)),
            (status, body.to_string()),
        );
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Recorded {
        self.requests().pop().expect("no request reached the backend")
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::with_base_url(&self.base_url)
    }

    pub fn client(&self) -> (BackendClient, Arc<MemorySessionStore>) {
        self.client_with_store(MemorySessionStore::new())
    }

    pub fn client_with_store(
        &self,
        store: MemorySessionStore,
    ) -> (BackendClient, Arc<MemorySessionStore>) {
        let store = Arc::new(store);
        let client = BackendClient::new(self.config(), store.clone() as Arc<dyn SessionStore>)
            .expect("client should build");
        (client, store)
    }

    /// Registers a successful login and logs `client` in.
    pub async fn login(&self, client: &BackendClient, role: &str) {
        self.on(
            "POST",
            "/auth/login",
            200,
            json!({"success": true, "data": {"token": "T1", "user": {"id": 1, "role": role}}}),
        );
        client.login("a@b.com", "x").await.expect("login should succeed");
    }
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header("authorization"),
        content_type: header("content-type"),
        body,
    });

    let route = state
        .routes
        .lock()
        .unwrap()
        .get(&(method.to_string(), uri.path().to_string()))
        .cloned();

    match route {
        Some((status, body)) => (
            StatusCode::from_u16(status).unwrap(),
            [("content-type", "application/json")],
            body,
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            [("content-type", "application/json")],
            json!({"success": false, "message": "Ruta no encontrada"}).to_string(),
        )
            .into_response(),
    }
}

/// Navigator that records what the client asked of the host.
#[derive(Default)]
pub struct RecordingNavigator {
    pub view: Option<String>,
    pub notices: Mutex<Vec<String>>,
    pub navigations: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn on_view(view: &str) -> Self {
        Self {
            view: Some(view.to_string()),
            ..Self::default()
        }
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_view(&self) -> Option<String> {
        self.view.clone()
    }

    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }

    fn navigate(&self, target: &str) {
        self.navigations.lock().unwrap().push(target.to_string());
    }
}
