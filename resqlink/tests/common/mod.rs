pub mod mock_backend;

use std::sync::Arc;

use resqlink::{ProviderConfig, RealProvider, SharedLocalStore};

pub use mock_backend::{MockBackend, TEST_ANON_KEY};

/// Real provider pointed at a running mock backend.
pub fn real_provider(backend: &MockBackend, store: SharedLocalStore) -> Arc<RealProvider> {
    let config = ProviderConfig::new(&backend.base_url, TEST_ANON_KEY);
    Arc::new(RealProvider::new(config, store).expect("Failed to build provider"))
}
