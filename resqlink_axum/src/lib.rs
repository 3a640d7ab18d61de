//! resqlink-axum - Axum integration for the resqlink session core
//!
//! JSON endpoints for the session, the sign-in modal and the hotspot viewer,
//! plus the route guard as middleware and extractor.
//!
//! The state is process-wide: one session, one sign-in modal and one viewer
//! shared by every HTTP client. This models a single operator at a device
//! console. Once that operator signs in, every request passes the guard as
//! them, so do not expose these routes to more than one user.

mod auth;
mod config;
mod error;
mod middleware;
mod router;
mod session;
mod state;
mod viewer;

pub use auth::{AuthView, FormUpdate, IdentityView, SessionView, SubmitView};
pub use config::RESQLINK_REDIRECT_ANON;
pub use error::IntoResponseError;
pub use middleware::require_identity;
pub use router::{resqlink_router, resqlink_router_no_trace};
pub use session::{CurrentIdentity, GuardRejection};
pub use state::AppState;
pub use viewer::{HotspotAction, HotspotView, ViewQuery, ViewerView};

// Re-export the initialization function from the resqlink crate
pub use resqlink::init;
