use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::storage::errors::StorageError;

use super::types::{FileLocalStore, LocalStore, make_key};

impl FileLocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        tracing::info!("Creating file local store at {}", dir.display());
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // ':' is not a valid file name character everywhere
        let file_name = format!("{}.json", make_key(key).replace(':', "_"));
        self.dir.join(file_name)
    }
}

#[async_trait]
impl LocalStore for FileLocalStore {
    async fn init(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
