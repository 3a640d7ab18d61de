//! Combined router for the session, sign-in modal and viewer endpoints

use axum::Router;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::state::AppState;

/// Create a combined router for all resqlink endpoints
///
/// The endpoints are relative to wherever the router is nested:
/// - /session, /session/sign-in, /session/sign-out, /session/me
/// - /auth, /auth/open, /auth/toggle, /auth/close, /auth/form, /auth/submit
/// - /viewer and /viewer/...
pub fn resqlink_router(state: AppState) -> Router {
    resqlink_router_no_trace(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as `resqlink_router()` without the HTTP tracing middleware.
pub fn resqlink_router_no_trace(state: AppState) -> Router {
    Router::new()
        .merge(super::auth::router(state.clone()))
        .merge(super::viewer::router())
        .with_state(state)
}
