use async_trait::async_trait;
use std::collections::HashMap;

use crate::storage::errors::StorageError;

use super::types::{InMemoryLocalStore, LocalStore, make_key};

impl InMemoryLocalStore {
    pub fn new() -> Self {
        tracing::info!("Creating new in-memory local store");
        Self {
            entry: HashMap::new(),
        }
    }
}

impl Default for InMemoryLocalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LocalStore for InMemoryLocalStore {
    async fn init(&self) -> Result<(), StorageError> {
        Ok(()) // Nothing to initialize for in-memory store
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entry.get(&make_key(key)).cloned())
    }

    async fn put(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entry.insert(make_key(key), value);
        Ok(())
    }

    async fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entry.remove(&make_key(key));
        Ok(())
    }
}
