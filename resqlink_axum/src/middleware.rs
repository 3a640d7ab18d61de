use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::session::{CurrentIdentity, check};
use super::state::AppState;

/// Gate for session-protected routes
///
/// Mount with `axum::middleware::from_fn_with_state(state, require_identity)`.
/// While the startup check runs the answer is an empty 204, anonymous
/// visitors are redirected to `RESQLINK_REDIRECT_ANON`, and signed-in
/// requests carry a [`CurrentIdentity`] in their extensions.
pub async fn require_identity(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    match check(&state) {
        Ok(identity) => {
            tracing::debug!("Identity: {}", identity.email);
            req.extensions_mut().insert(CurrentIdentity(identity));
            next.run(req).await
        }
        Err(rejection) => rejection.into_response(),
    }
}
