mod errors;
mod mock;
mod real;
mod types;

use std::sync::Arc;

use crate::config::{ProviderConfig, is_real_backend_configured};
use crate::storage::SharedLocalStore;

pub use errors::ProviderError;
pub use types::{AuthChange, IdentityProvider, MockProvider, ProviderKind, RealProvider};

/// Build the backend chosen by `config`.
pub fn select_provider(
    config: &ProviderConfig,
    store: SharedLocalStore,
) -> Result<Arc<dyn IdentityProvider>, ProviderError> {
    if config.is_real_backend() {
        tracing::info!("Using identity backend at {}", config.url);
        Ok(Arc::new(RealProvider::new(config.clone(), store)?))
    } else {
        tracing::info!("Identity backend not configured, using mock authentication");
        Ok(Arc::new(MockProvider::new(store)))
    }
}

/// Build the backend selected by the process-wide capability check.
pub fn provider_from_env(
    store: SharedLocalStore,
) -> Result<Arc<dyn IdentityProvider>, ProviderError> {
    let config = ProviderConfig::from_env();
    if is_real_backend_configured() {
        Ok(Arc::new(RealProvider::new(config, store)?))
    } else {
        Ok(Arc::new(MockProvider::new(store)))
    }
}
