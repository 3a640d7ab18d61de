use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::storage::errors::StorageError;

/// Namespace prepended to every key so records never collide with other apps.
pub(super) const KEY_NAMESPACE: &str = "resqlink";

pub(super) fn make_key(key: &str) -> String {
    format!("{KEY_NAMESPACE}:{key}")
}

pub struct InMemoryLocalStore {
    pub(super) entry: HashMap<String, String>,
}

pub struct FileLocalStore {
    pub(super) dir: PathBuf,
}

/// Durable key-value storage local to this process's host.
#[async_trait]
pub trait LocalStore: Send + Sync + 'static {
    /// Initialize the store. This is called when the store is created.
    async fn init(&self) -> Result<(), StorageError>;

    /// Read the raw value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn put(&mut self, key: &str, value: String) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is not an error.
    async fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

pub type SharedLocalStore = Arc<Mutex<Box<dyn LocalStore>>>;

pub fn shared(store: impl LocalStore) -> SharedLocalStore {
    let boxed: Box<dyn LocalStore> = Box::new(store);
    Arc::new(Mutex::new(boxed))
}
