//! resqlink - Session and interaction core for the ResQLink site
//!
//! This crate holds who is signed in, talks to the identity backend (a
//! Supabase-style service or a local mock), drives the sign-in modal and
//! tracks the hotspot selection on the RQL-X1 device model.

mod auth_flow;
mod config;
mod hotspot;
mod provider;
mod session;
mod storage;
mod utils;

#[cfg(test)]
mod test_utils;

use std::sync::Arc;

pub use auth_flow::{
    AuthFlow, AuthFlowError, AuthForm, AuthMode, AuthState, DEMO_MODE_NOTICE,
    FALLBACK_ERROR_MESSAGE, FormField, SubmitOutcome, SubmitTicket,
};

pub use config::{
    MOCK_AUTH_LATENCY, PLACEHOLDER_SUPABASE_ANON_KEY, PLACEHOLDER_SUPABASE_URL, ProviderConfig,
    STARTUP_MIN_DURATION, is_real_backend_configured,
};

pub use hotspot::{
    HotspotAnnotation, HotspotId, HotspotState, HotspotViewer, PartPlacement, ROTATION_STEP,
    RQL_X1_HOTSPOTS, Vec3, anchor, annotation,
};

pub use provider::{
    AuthChange, IdentityProvider, MockProvider, ProviderError, ProviderKind, RealProvider,
    provider_from_env, select_provider,
};

pub use session::{
    GuardDecision, Identity, SessionState, SessionStore, finish_no_earlier_than, guard,
};

pub use storage::{
    FileLocalStore, InMemoryLocalStore, LocalStore, MOCK_USER_KEY, SharedLocalStore, StorageError,
    delete_record, in_memory_store, load_record, local_store_from_env, save_record, shared,
};

/// Build the session store from the environment.
///
/// The store is returned before the startup check; call
/// [`SessionStore::initialize`] (usually on a spawned task) to run it.
pub async fn init() -> Result<Arc<SessionStore>, Box<dyn std::error::Error + Send + Sync>> {
    let local = local_store_from_env().await?;
    let provider = provider_from_env(local)?;
    Ok(SessionStore::new(provider))
}
