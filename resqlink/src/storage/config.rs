use std::{
    env,
    sync::{Arc, LazyLock},
};
use tokio::sync::Mutex;

use super::errors::StorageError;
use super::types::{FileLocalStore, InMemoryLocalStore, LocalStore, SharedLocalStore, shared};

pub static LOCAL_STORE_TYPE: LazyLock<String> =
    LazyLock::new(|| env::var("LOCAL_STORE_TYPE").unwrap_or_else(|_| "memory".to_string()));

pub static LOCAL_STORE_PATH: LazyLock<String> =
    LazyLock::new(|| env::var("LOCAL_STORE_PATH").unwrap_or_else(|_| ".resqlink".to_string()));

/// Build the local store selected by `LOCAL_STORE_TYPE`.
pub async fn local_store_from_env() -> Result<SharedLocalStore, StorageError> {
    let store_type = LOCAL_STORE_TYPE.as_str();
    let store_path = LOCAL_STORE_PATH.as_str();

    tracing::info!(
        "Initializing local store with type: {}, path: {}",
        store_type,
        store_path
    );

    let store: Box<dyn LocalStore> = match store_type {
        "memory" => Box::new(InMemoryLocalStore::new()),
        "file" => Box::new(FileLocalStore::new(store_path)),
        t => {
            return Err(StorageError::Storage(format!(
                "Unsupported local store type: {t}. Supported types are 'memory' and 'file'"
            )));
        }
    };
    store.init().await?;

    Ok(Arc::new(Mutex::new(store)))
}

/// In-memory store wrapped for sharing, the usual choice in tests.
pub fn in_memory_store() -> SharedLocalStore {
    shared(InMemoryLocalStore::new())
}
