//! Test helpers shared by the unit tests of several modules

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::broadcast;

use crate::provider::{AuthChange, IdentityProvider, ProviderError, ProviderKind};
use crate::session::Identity;

/// Provider whose answers are set up by the test.
pub(crate) struct ScriptedProvider {
    pub(crate) kind: ProviderKind,
    pub(crate) session: Mutex<Result<Option<Identity>, ProviderError>>,
    pub(crate) sign_in_result: Mutex<Result<Identity, ProviderError>>,
    pub(crate) sign_out_result: Mutex<Result<(), ProviderError>>,
    pub(crate) changes: broadcast::Sender<AuthChange>,
    pub(crate) sign_in_calls: AtomicUsize,
    pub(crate) sign_up_calls: AtomicUsize,
    pub(crate) sign_out_calls: AtomicUsize,
    pub(crate) refresh_calls: AtomicUsize,
}

impl ScriptedProvider {
    pub(crate) fn new(kind: ProviderKind) -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            kind,
            session: Mutex::new(Ok(None)),
            sign_in_result: Mutex::new(Err(ProviderError::InvalidCredentials(String::new()))),
            sign_out_result: Mutex::new(Ok(())),
            changes,
            sign_in_calls: AtomicUsize::new(0),
            sign_up_calls: AtomicUsize::new(0),
            sign_out_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_session(self, session: Result<Option<Identity>, ProviderError>) -> Self {
        *self.session.lock().unwrap() = session;
        self
    }

    pub(crate) fn with_sign_in(self, result: Result<Identity, ProviderError>) -> Self {
        *self.sign_in_result.lock().unwrap() = result;
        self
    }

    pub(crate) fn with_sign_out(self, result: Result<(), ProviderError>) -> Self {
        *self.sign_out_result.lock().unwrap() = result;
        self
    }

    pub(crate) fn push(&self, change: AuthChange) {
        self.changes.send(change).unwrap();
    }

    pub(crate) fn backend_calls(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst) + self.sign_up_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for ScriptedProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn sign_in(&self, _email: &str, _password: &str) -> Result<Identity, ProviderError> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        self.sign_in_result.lock().unwrap().clone()
    }

    async fn sign_up(
        &self,
        _email: &str,
        _password: &str,
        _display_name: &str,
    ) -> Result<Identity, ProviderError> {
        self.sign_up_calls.fetch_add(1, Ordering::SeqCst);
        self.sign_in_result.lock().unwrap().clone()
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        self.sign_out_result.lock().unwrap().clone()
    }

    async fn current_session(&self) -> Result<Option<Identity>, ProviderError> {
        self.session.lock().unwrap().clone()
    }

    fn subscribe(&self) -> Option<broadcast::Receiver<AuthChange>> {
        match self.kind {
            ProviderKind::Real => Some(self.changes.subscribe()),
            ProviderKind::Mock => None,
        }
    }

    async fn refresh_if_expiring(&self) -> Result<(), ProviderError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
