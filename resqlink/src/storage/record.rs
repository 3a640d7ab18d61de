use serde::{Serialize, de::DeserializeOwned};

use super::errors::StorageError;
use super::types::SharedLocalStore;

/// Key of the identity written by the mock backend.
pub const MOCK_USER_KEY: &str = "resqlink_mock_user";

/// Key of the token session kept for the real backend.
pub const AUTH_SESSION_KEY: &str = "resqlink_auth_session";

/// Read and deserialize the record under `key`.
///
/// A record that exists but does not parse is an error, so callers can
/// decide whether "malformed" should read as "absent".
pub async fn load_record<T: DeserializeOwned>(
    store: &SharedLocalStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let raw = store.lock().await.get(key).await?;
    match raw {
        Some(value) => Ok(Some(serde_json::from_str(&value)?)),
        None => Ok(None),
    }
}

pub async fn save_record<T: Serialize>(
    store: &SharedLocalStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let value = serde_json::to_string(value)?;
    store.lock().await.put(key, value).await
}

pub async fn delete_record(store: &SharedLocalStore, key: &str) -> Result<(), StorageError> {
    store.lock().await.remove(key).await
}
