use axum::{
    extract::FromRequestParts,
    response::{IntoResponse, Redirect, Response},
};
use http::{StatusCode, request::Parts};

use resqlink::{GuardDecision, Identity, guard};

use super::config::RESQLINK_REDIRECT_ANON;
use super::state::AppState;

/// Why a protected request did not get an identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardRejection {
    /// Startup check still running: empty response, no redirect.
    Pending,
    Redirect(String),
}

impl IntoResponse for GuardRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Pending => {
                tracing::debug!("Session still initializing, deferring");
                StatusCode::NO_CONTENT.into_response()
            }
            Self::Redirect(to) => {
                tracing::debug!("Redirecting to {}", to);
                Redirect::temporary(&to).into_response()
            }
        }
    }
}

/// Run the route guard against the current session state.
pub(crate) fn check(state: &AppState) -> Result<Identity, GuardRejection> {
    match guard(&state.session.state(), RESQLINK_REDIRECT_ANON.as_str()) {
        GuardDecision::Allow(identity) => Ok(identity),
        GuardDecision::Defer => Err(GuardRejection::Pending),
        GuardDecision::Redirect(to) => Err(GuardRejection::Redirect(to)),
    }
}

/// Signed-in identity, available as an Axum extractor
///
/// Behind [`require_identity`](crate::require_identity) it is taken from the
/// request extensions; elsewhere the route guard runs on the spot.
///
/// # Example
///
/// ```no_run
/// use axum::{routing::get, Router};
/// use resqlink_axum::{AppState, CurrentIdentity};
///
/// async fn account(CurrentIdentity(identity): CurrentIdentity) -> String {
///     format!("Hello, {}!", identity.display_name_or_fallback())
/// }
///
/// fn routes(state: AppState) -> Router {
///     Router::new().route("/account", get(account)).with_state(state)
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentIdentity(pub Identity);

impl FromRequestParts<AppState> for CurrentIdentity {
    type Rejection = GuardRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<CurrentIdentity>() {
            return Ok(identity.clone());
        }
        check(state).map(CurrentIdentity)
    }
}
