use super::types::{Identity, SessionState};

/// What a protected page should do for the current session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Startup restoration still running: render nothing yet.
    Defer,
    /// Anonymous: send the visitor to this route.
    Redirect(String),
    Allow(Identity),
}

/// Gate for session-protected pages.
///
/// While the startup check runs the decision is deferred, so a restored
/// session never sees a redirect flash.
pub fn guard(state: &SessionState, anonymous_route: &str) -> GuardDecision {
    if state.initializing {
        return GuardDecision::Defer;
    }
    match &state.current {
        Some(identity) => GuardDecision::Allow(identity.clone()),
        None => GuardDecision::Redirect(anonymous_route.to_string()),
    }
}
