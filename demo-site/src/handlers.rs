use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::{Html, Redirect},
    routing::{get, post},
};
use serde::Deserialize;

use resqlink::{AuthFlow, AuthMode, DEMO_MODE_NOTICE, HotspotAnnotation, Identity, RQL_X1_HOTSPOTS};
use resqlink_axum::{AppState, CurrentIdentity, IntoResponseError, require_identity};

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    initializing: bool,
    identity: Option<Identity>,
    modal: Option<ModalView>,
    hotspots: &'a [HotspotAnnotation],
}

/// What the page needs to draw the sign-in modal
struct ModalView {
    title: &'static str,
    submit_label: &'static str,
    signup: bool,
    toggle_label: &'static str,
    error: Option<String>,
    notice: Option<&'static str>,
    email: String,
}

impl ModalView {
    fn from_flow(flow: &AuthFlow) -> Option<Self> {
        if !flow.is_open() {
            return None;
        }
        let signup = flow.state().mode() == Some(AuthMode::Signup);
        Some(Self {
            title: flow.title(),
            submit_label: flow.submit_label(),
            signup,
            toggle_label: if signup {
                "Already have an account? Log in"
            } else {
                "Need an account? Sign up"
            },
            error: flow.error_message().map(str::to_string),
            notice: flow.demo_mode().then_some(DEMO_MODE_NOTICE),
            email: flow.form().email.clone(),
        })
    }
}

#[derive(Template)]
#[template(path = "account.html")]
struct AccountTemplate {
    identity: Identity,
}

/// Fields posted by the modal's HTML form
#[derive(Debug, Default, Deserialize)]
pub(crate) struct CredentialsForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    display_name: String,
}

/// Page routes. Every form POST answers with a redirect back to a page.
pub(crate) fn pages(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route(
            "/account",
            get(account).route_layer(from_fn_with_state(state.clone(), require_identity)),
        )
        .route("/sign-in", post(open_sign_in))
        .route("/sign-in/toggle", post(toggle_mode))
        .route("/sign-in/close", post(close_sign_in))
        .route("/sign-in/submit", post(submit_sign_in))
        .route("/sign-out", post(sign_out))
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Result<Html<String>, (StatusCode, String)> {
    let session = state.session.state();
    let modal = ModalView::from_flow(&*state.auth.lock().await);
    let template = IndexTemplate {
        initializing: session.initializing,
        identity: session.current,
        modal,
        hotspots: &RQL_X1_HOTSPOTS,
    };
    let html = Html(
        template
            .render()
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?,
    );
    Ok(html)
}

async fn account(
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<Html<String>, (StatusCode, String)> {
    tracing::trace!("Rendering account page for {}", identity.email);
    let template = AccountTemplate { identity };
    let html = Html(
        template
            .render()
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?,
    );
    Ok(html)
}

async fn open_sign_in(State(state): State<AppState>) -> Redirect {
    state.auth.lock().await.open();
    Redirect::to("/")
}

async fn toggle_mode(State(state): State<AppState>) -> Result<Redirect, (StatusCode, String)> {
    state.auth.lock().await.toggle_mode().into_response_error()?;
    Ok(Redirect::to("/"))
}

async fn close_sign_in(State(state): State<AppState>) -> Redirect {
    state.auth.lock().await.close();
    Redirect::to("/")
}

/// A rejected submission lands back on `/` with the modal showing the error.
async fn submit_sign_in(
    State(state): State<AppState>,
    Form(credentials): Form<CredentialsForm>,
) -> Result<Redirect, (StatusCode, String)> {
    let ticket = {
        let mut flow = state.auth.lock().await;
        let form = flow.form_mut();
        form.email = credentials.email;
        form.password = credentials.password;
        form.display_name = credentials.display_name;
        flow.begin_submit().into_response_error()?
    };

    let result = AuthFlow::perform(state.session.provider().as_ref(), &ticket).await;
    state
        .auth
        .lock()
        .await
        .finish_submit(&ticket, result, &state.session);
    Ok(Redirect::to("/"))
}

async fn sign_out(State(state): State<AppState>) -> Redirect {
    state.session.sign_out().await;
    Redirect::to("/")
}
