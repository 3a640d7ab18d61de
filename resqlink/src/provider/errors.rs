use thiserror::Error;

use crate::storage::StorageError;
use crate::utils::UtilError;

#[derive(Debug, Error, Clone)]
pub enum ProviderError {
    /// The backend rejected the email/password pair.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The backend refused to create the account.
    #[error("Sign up rejected: {0}")]
    SignUpRejected(String),

    /// Network failure, timeout or server-side error.
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ProviderError {
    /// The description supplied by the backend, if it supplied one.
    pub fn message(&self) -> Option<&str> {
        let message = match self {
            Self::InvalidCredentials(m)
            | Self::SignUpRejected(m)
            | Self::BackendUnavailable(m)
            | Self::Storage(m)
            | Self::Config(m) => m.as_str(),
        };
        if message.trim().is_empty() {
            None
        } else {
            Some(message)
        }
    }
}

impl From<StorageError> for ProviderError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<UtilError> for ProviderError {
    fn from(err: UtilError) -> Self {
        Self::Storage(err.to_string())
    }
}
