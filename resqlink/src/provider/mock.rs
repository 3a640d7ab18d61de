use async_trait::async_trait;
use std::time::Duration;

use crate::config::MOCK_AUTH_LATENCY;
use crate::provider::errors::ProviderError;
use crate::session::Identity;
use crate::storage::{
    MOCK_USER_KEY, SharedLocalStore, StorageError, delete_record, load_record, save_record,
};
use crate::utils::{MOCK_ID_LEN, gen_random_base36};

use super::types::{IdentityProvider, MockProvider, ProviderKind};

impl MockProvider {
    pub fn new(store: SharedLocalStore) -> Self {
        Self {
            store,
            latency: *MOCK_AUTH_LATENCY,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Accepts any credentials: builds an identity for `email` and keeps it
    /// in the local store so a restart can restore it.
    async fn fabricate(
        &self,
        email: &str,
        display_name: Option<String>,
    ) -> Result<Identity, ProviderError> {
        tokio::time::sleep(self.latency).await;

        let identity = Identity::new(gen_random_base36(MOCK_ID_LEN)?, email, display_name);
        save_record(&self.store, MOCK_USER_KEY, &identity).await?;

        tracing::info!("Mock sign-in for {} (id {})", identity.email, identity.id);
        Ok(identity)
    }
}

#[async_trait]
impl IdentityProvider for MockProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Mock
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<Identity, ProviderError> {
        self.fabricate(email, None).await
    }

    async fn sign_up(
        &self,
        email: &str,
        _password: &str,
        display_name: &str,
    ) -> Result<Identity, ProviderError> {
        self.fabricate(email, Some(display_name.to_string())).await
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        delete_record(&self.store, MOCK_USER_KEY).await?;
        tracing::debug!("Mock session record deleted");
        Ok(())
    }

    async fn current_session(&self) -> Result<Option<Identity>, ProviderError> {
        match load_record::<Identity>(&self.store, MOCK_USER_KEY).await {
            Ok(identity) => Ok(identity),
            Err(StorageError::Serde(e)) => {
                tracing::warn!("Ignoring malformed mock session record: {}", e);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}
