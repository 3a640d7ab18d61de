//! Session and sign-in modal endpoints

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};

use resqlink::{
    AuthFlow, AuthMode, DEMO_MODE_NOTICE, Identity, SessionState, SubmitOutcome,
};

use super::error::IntoResponseError;
use super::middleware::require_identity;
use super::session::CurrentIdentity;
use super::state::AppState;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct IdentityView {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub initial: String,
    pub node_id: String,
}

impl From<&Identity> for IdentityView {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.clone(),
            email: identity.email.clone(),
            display_name: identity.display_name_or_fallback().to_string(),
            initial: identity.initial(),
            node_id: identity.node_id(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub initializing: bool,
    pub authenticated: bool,
    pub identity: Option<IdentityView>,
}

impl From<&SessionState> for SessionView {
    fn from(state: &SessionState) -> Self {
        Self {
            initializing: state.initializing,
            authenticated: state.is_authenticated(),
            identity: state.current.as_ref().map(IdentityView::from),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthView {
    pub open: bool,
    pub state: &'static str,
    pub mode: Option<&'static str>,
    pub title: &'static str,
    pub submit_label: &'static str,
    pub demo_notice: Option<&'static str>,
    pub error: Option<String>,
    pub email: String,
}

impl From<&AuthFlow> for AuthView {
    fn from(flow: &AuthFlow) -> Self {
        Self {
            open: flow.is_open(),
            state: flow.state().name(),
            mode: flow.state().mode().map(|mode| match mode {
                AuthMode::Login => "login",
                AuthMode::Signup => "signup",
            }),
            title: flow.title(),
            submit_label: flow.submit_label(),
            demo_notice: flow.demo_mode().then_some(DEMO_MODE_NOTICE),
            error: flow.error_message().map(str::to_string),
            email: flow.form().email.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitView {
    pub outcome: &'static str,
    pub message: Option<String>,
    pub auth: AuthView,
    pub session: SessionView,
}

/// Partial update of the modal's inputs
#[derive(Debug, Default, Deserialize)]
pub struct FormUpdate {
    pub email: Option<String>,
    pub password: Option<String>,
    pub display_name: Option<String>,
}

pub(super) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/session", get(get_session))
        .route("/session/sign-in", post(request_sign_in))
        .route("/session/sign-out", post(sign_out))
        .route(
            "/session/me",
            get(me).route_layer(from_fn_with_state(state, require_identity)),
        )
        .route("/auth", get(get_auth))
        .route("/auth/open", post(open))
        .route("/auth/toggle", post(toggle))
        .route("/auth/close", post(close))
        .route("/auth/form", put(update_form))
        .route("/auth/submit", post(submit))
}

async fn get_session(State(state): State<AppState>) -> Json<SessionView> {
    Json(SessionView::from(&state.session.state()))
}

async fn request_sign_in(State(state): State<AppState>) -> StatusCode {
    state.session.request_sign_in();
    StatusCode::ACCEPTED
}

async fn sign_out(State(state): State<AppState>) -> StatusCode {
    state.session.sign_out().await;
    StatusCode::NO_CONTENT
}

async fn me(CurrentIdentity(identity): CurrentIdentity) -> Json<IdentityView> {
    Json(IdentityView::from(&identity))
}

async fn get_auth(State(state): State<AppState>) -> Json<AuthView> {
    let flow = state.auth.lock().await;
    Json(AuthView::from(&*flow))
}

async fn open(State(state): State<AppState>) -> Json<AuthView> {
    let mut flow = state.auth.lock().await;
    flow.open();
    Json(AuthView::from(&*flow))
}

async fn toggle(State(state): State<AppState>) -> Result<Json<AuthView>, (StatusCode, String)> {
    let mut flow = state.auth.lock().await;
    flow.toggle_mode().into_response_error()?;
    Ok(Json(AuthView::from(&*flow)))
}

async fn close(State(state): State<AppState>) -> Json<AuthView> {
    let mut flow = state.auth.lock().await;
    flow.close();
    Json(AuthView::from(&*flow))
}

async fn update_form(
    State(state): State<AppState>,
    Json(update): Json<FormUpdate>,
) -> Json<AuthView> {
    let mut flow = state.auth.lock().await;
    let form = flow.form_mut();
    if let Some(email) = update.email {
        form.email = email;
    }
    if let Some(password) = update.password {
        form.password = password;
    }
    if let Some(display_name) = update.display_name {
        form.display_name = display_name;
    }
    Json(AuthView::from(&*flow))
}

/// The lock is released while the backend call runs, so the modal can be
/// closed in the meantime.
async fn submit(State(state): State<AppState>) -> Result<Json<SubmitView>, (StatusCode, String)> {
    let ticket = state.auth.lock().await.begin_submit().into_response_error()?;
    tracing::debug!("Submitting auth form for {}", ticket.email());

    let result = AuthFlow::perform(state.session.provider().as_ref(), &ticket).await;

    let mut flow = state.auth.lock().await;
    let (outcome, message) = match flow.finish_submit(&ticket, result, &state.session) {
        SubmitOutcome::SignedIn(_) => ("signed_in", None),
        SubmitOutcome::Failed(message) => ("failed", Some(message)),
        SubmitOutcome::Stale => ("stale", None),
    };

    Ok(Json(SubmitView {
        outcome,
        message,
        auth: AuthView::from(&*flow),
        session: SessionView::from(&state.session.state()),
    }))
}
