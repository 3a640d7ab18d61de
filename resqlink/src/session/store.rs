use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::config::STARTUP_MIN_DURATION;
use crate::provider::{IdentityProvider, ProviderKind};

use super::pacing::finish_no_earlier_than;
use super::types::{Identity, SessionState};

/// How often an active real backend is asked to renew expiring tokens.
const TOKEN_REFRESH_TICK: Duration = Duration::from_secs(30);

/// Single authority for who is signed in.
///
/// Readers observe the state through [`SessionStore::subscribe`]; only the
/// store's own methods write it.
pub struct SessionStore {
    provider: Arc<dyn IdentityProvider>,
    state: Arc<watch::Sender<SessionState>>,
    sign_in_requests: broadcast::Sender<()>,
    initialized: AtomicBool,
    min_startup: Duration,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

fn apply_identity(state: &watch::Sender<SessionState>, current: Option<Identity>) {
    state.send_if_modified(|s| {
        if s.current == current {
            return false;
        }
        s.current = current;
        true
    });
}

impl SessionStore {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Arc<Self> {
        Self::with_min_startup(provider, *STARTUP_MIN_DURATION)
    }

    pub fn with_min_startup(provider: Arc<dyn IdentityProvider>, min_startup: Duration) -> Arc<Self> {
        let (state, _) = watch::channel(SessionState::default());
        let (sign_in_requests, _) = broadcast::channel(8);
        Arc::new(Self {
            provider,
            state: Arc::new(state),
            sign_in_requests,
            initialized: AtomicBool::new(false),
            min_startup,
            tasks: Mutex::new(Vec::new()),
        })
    }

    pub fn provider(&self) -> &Arc<dyn IdentityProvider> {
        &self.provider
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn current(&self) -> Option<Identity> {
        self.state.borrow().current.clone()
    }

    pub fn is_initializing(&self) -> bool {
        self.state.borrow().initializing
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// One-time startup check.
    ///
    /// Restores an existing session from the active backend and flips
    /// `initializing` off no earlier than the startup floor. Backend errors
    /// are logged and read as "no session". Other operations on the store
    /// stay usable while this runs.
    pub async fn initialize(&self) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            tracing::warn!("Session store already initialized, ignoring");
            return;
        }

        self.subscribe_to_backend_changes();

        finish_no_earlier_than(self.min_startup, async {
            match self.provider.current_session().await {
                Ok(Some(identity)) => {
                    tracing::info!("Restored session for {}", identity.email);
                    apply_identity(&self.state, Some(identity));
                }
                Ok(None) => tracing::debug!("No existing session"),
                Err(e) => tracing::warn!("Startup session check failed, continuing anonymous: {}", e),
            }
        })
        .await;

        self.state.send_modify(|s| s.initializing = false);
        tracing::debug!("Session store initialized");
    }

    /// Follow the backend's own change notifications, in arrival order,
    /// for as long as the store lives.
    fn subscribe_to_backend_changes(&self) {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(mut changes) = self.provider.subscribe() {
            let state = self.state.clone();
            tasks.push(tokio::spawn(async move {
                loop {
                    match changes.recv().await {
                        Ok(change) => {
                            tracing::debug!("Backend session change: {:?}", change);
                            apply_identity(&state, change.identity().cloned());
                        }
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!("Missed {} backend session changes", skipped);
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }
            }));
        }

        if self.provider.kind() == ProviderKind::Real {
            let provider = self.provider.clone();
            tasks.push(tokio::spawn(async move {
                // The startup check already refreshed anything about to expire
                let first = tokio::time::Instant::now() + TOKEN_REFRESH_TICK;
                let mut tick = tokio::time::interval_at(first, TOKEN_REFRESH_TICK);
                loop {
                    tick.tick().await;
                    if let Err(e) = provider.refresh_if_expiring().await {
                        tracing::warn!("Token refresh failed: {}", e);
                    }
                }
            }));
        }
    }

    /// Ask whoever hosts the auth flow to show it.
    pub fn request_sign_in(&self) {
        tracing::debug!("Sign-in requested");
        // Nobody hosting the flow is not an error
        let _ = self.sign_in_requests.send(());
    }

    pub fn sign_in_requests(&self) -> broadcast::Receiver<()> {
        self.sign_in_requests.subscribe()
    }

    /// Record the identity produced by a successful sign-in or sign-up.
    pub fn complete_sign_in(&self, identity: Identity) {
        tracing::info!("Signed in as {}", identity.email);
        apply_identity(&self.state, Some(identity));
    }

    /// Sign out through the backend, then clear the local session whatever
    /// the backend said.
    pub async fn sign_out(&self) {
        if let Err(e) = self.provider.sign_out().await {
            tracing::warn!("Backend sign-out failed, clearing local session anyway: {}", e);
        }
        apply_identity(&self.state, None);
        tracing::info!("Signed out");
    }

    /// Stop following backend changes and token refresh.
    pub fn shutdown(&self) {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        for task in tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for SessionStore {
    fn drop(&mut self) {
        self.shutdown();
    }
}
