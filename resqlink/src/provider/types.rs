use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::broadcast;
use url::Url;

use crate::provider::errors::ProviderError;
use crate::session::Identity;
use crate::storage::SharedLocalStore;

pub struct MockProvider {
    pub(super) store: SharedLocalStore,
    pub(super) latency: Duration,
}

pub struct RealProvider {
    pub(super) base_url: Url,
    pub(super) anon_key: String,
    pub(super) client: reqwest::Client,
    pub(super) store: SharedLocalStore,
    pub(super) changes: broadcast::Sender<AuthChange>,
}

/// Which backend variant is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Real,
    Mock,
}

/// Session change pushed by a backend outside of an explicit call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthChange {
    SignedIn(Identity),
    TokenRefreshed(Identity),
    SignedOut,
}

impl AuthChange {
    /// The identity that should be current after this change.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::SignedIn(identity) | Self::TokenRefreshed(identity) => Some(identity),
            Self::SignedOut => None,
        }
    }
}

/// Uniform boundary over the identity backends.
#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    fn kind(&self) -> ProviderKind;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, ProviderError>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Identity, ProviderError>;

    async fn sign_out(&self) -> Result<(), ProviderError>;

    /// Existing valid session, looked up without prompting for credentials.
    async fn current_session(&self) -> Result<Option<Identity>, ProviderError>;

    /// Feed of changes the backend pushes on its own. `None` when the
    /// backend never pushes anything.
    fn subscribe(&self) -> Option<broadcast::Receiver<AuthChange>> {
        None
    }

    /// Renew credentials that are about to expire.
    async fn refresh_if_expiring(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
