//! Axum-based stand-in for the GoTrue auth REST API
//!
//! Each test starts its own server on an ephemeral port so tests never share
//! accounts or tokens.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering},
    sync::{Arc, Mutex},
    time::{SystemTime, UNIX_EPOCH},
};
use tokio::{net::TcpListener, task::JoinHandle};
use uuid::Uuid;

pub const TEST_ANON_KEY: &str = "test-anon-key";

#[derive(Clone, Debug)]
pub struct Account {
    pub id: String,
    pub password: String,
    pub full_name: Option<String>,
}

/// Shared state of the mock server
#[derive(Clone)]
pub struct MockBackendState {
    pub accounts: Arc<Mutex<HashMap<String, Account>>>,
    /// refresh token -> email
    pub refresh_tokens: Arc<Mutex<HashMap<String, String>>>,
    /// access token -> email
    pub access_tokens: Arc<Mutex<HashMap<String, String>>>,
    /// Lifetime handed out with new sessions
    pub expires_in: Arc<AtomicI64>,
    /// When set, every endpoint answers 503
    pub unavailable: Arc<AtomicBool>,
    pub password_grants: Arc<AtomicUsize>,
    pub refresh_grants: Arc<AtomicUsize>,
    pub logouts: Arc<AtomicUsize>,
}

impl Default for MockBackendState {
    fn default() -> Self {
        Self {
            accounts: Arc::default(),
            refresh_tokens: Arc::default(),
            access_tokens: Arc::default(),
            expires_in: Arc::new(AtomicI64::new(3600)),
            unavailable: Arc::default(),
            password_grants: Arc::default(),
            refresh_grants: Arc::default(),
            logouts: Arc::default(),
        }
    }
}

impl MockBackendState {
    pub fn add_account(&self, email: &str, password: &str, full_name: Option<&str>) -> String {
        let id = Uuid::new_v4().to_string();
        self.accounts.lock().unwrap().insert(
            email.to_string(),
            Account {
                id: id.clone(),
                password: password.to_string(),
                full_name: full_name.map(str::to_string),
            },
        );
        id
    }

    /// Invalidate every refresh token handed out so far.
    pub fn revoke_refresh_tokens(&self) {
        self.refresh_tokens.lock().unwrap().clear();
    }

    fn issue_session(&self, email: &str) -> Value {
        let account = self.accounts.lock().unwrap().get(email).cloned();
        let Some(account) = account else {
            return json!({});
        };

        let access_token = format!("access-{}", Uuid::new_v4());
        let refresh_token = format!("refresh-{}", Uuid::new_v4());
        self.access_tokens
            .lock()
            .unwrap()
            .insert(access_token.clone(), email.to_string());
        self.refresh_tokens
            .lock()
            .unwrap()
            .insert(refresh_token.clone(), email.to_string());

        let expires_in = self.expires_in.load(Ordering::SeqCst);
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64;

        json!({
            "access_token": access_token,
            "token_type": "bearer",
            "expires_in": expires_in,
            "expires_at": now + expires_in,
            "refresh_token": refresh_token,
            "user": {
                "id": account.id,
                "aud": "authenticated",
                "email": email,
                "user_metadata": { "full_name": account.full_name },
            },
        })
    }
}

/// Running mock server
pub struct MockBackend {
    pub base_url: String,
    pub state: MockBackendState,
    handle: JoinHandle<()>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = MockBackendState::default();
        let app = Router::new()
            .route("/auth/v1/token", post(token))
            .route("/auth/v1/signup", post(signup))
            .route("/auth/v1/logout", post(logout))
            .with_state(state.clone());

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("No local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock backend failed");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
            handle,
        }
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn error(status: StatusCode, msg: &str) -> Response {
    (status, Json(json!({ "code": status.as_u16(), "msg": msg }))).into_response()
}

fn gate(state: &MockBackendState, headers: &HeaderMap) -> Option<Response> {
    if state.unavailable.load(Ordering::SeqCst) {
        return Some(error(StatusCode::SERVICE_UNAVAILABLE, "Service unavailable"));
    }
    match headers.get("apikey").and_then(|v| v.to_str().ok()) {
        Some(TEST_ANON_KEY) => None,
        _ => Some(error(StatusCode::UNAUTHORIZED, "Invalid API key")),
    }
}

async fn token(
    State(state): State<MockBackendState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(rejection) = gate(&state, &headers) {
        return rejection;
    }

    match params.get("grant_type").map(String::as_str) {
        Some("password") => {
            state.password_grants.fetch_add(1, Ordering::SeqCst);
            let email = body["email"].as_str().unwrap_or_default();
            let password = body["password"].as_str().unwrap_or_default();
            let known = state
                .accounts
                .lock()
                .unwrap()
                .get(email)
                .is_some_and(|account| account.password == password);
            if !known {
                return error(StatusCode::BAD_REQUEST, "Invalid login credentials");
            }
            Json(state.issue_session(email)).into_response()
        }
        Some("refresh_token") => {
            state.refresh_grants.fetch_add(1, Ordering::SeqCst);
            let token = body["refresh_token"].as_str().unwrap_or_default();
            let email = state.refresh_tokens.lock().unwrap().remove(token);
            match email {
                Some(email) => Json(state.issue_session(&email)).into_response(),
                None => error(
                    StatusCode::BAD_REQUEST,
                    "Invalid Refresh Token: Refresh Token Not Found",
                ),
            }
        }
        _ => error(StatusCode::BAD_REQUEST, "Unsupported grant type"),
    }
}

async fn signup(
    State(state): State<MockBackendState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(rejection) = gate(&state, &headers) {
        return rejection;
    }

    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    if password.len() < 6 {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Password should be at least 6 characters.",
        );
    }
    if state.accounts.lock().unwrap().contains_key(email) {
        return error(StatusCode::UNPROCESSABLE_ENTITY, "User already registered");
    }

    let full_name = body["data"]["full_name"].as_str();
    state.add_account(email, password, full_name);
    Json(state.issue_session(email)).into_response()
}

async fn logout(State(state): State<MockBackendState>, headers: HeaderMap) -> Response {
    if let Some(rejection) = gate(&state, &headers) {
        return rejection;
    }

    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default()
        .to_string();
    if state.access_tokens.lock().unwrap().remove(&token).is_none() {
        return error(StatusCode::UNAUTHORIZED, "Invalid token");
    }

    state.logouts.fetch_add(1, Ordering::SeqCst);
    StatusCode::NO_CONTENT.into_response()
}
