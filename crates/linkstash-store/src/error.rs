use linkstash_core::CoreError;
use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by the storage backend.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("failed to read persisted document: {0}")]
    Io(String),
    #[error("persisted document is invalid: {0}")]
    Serialization(String),
}

/// Errors surfaced by the URL record store.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("short code already taken: {0}")]
    ShortcodeTaken(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<CoreError> for StoreError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidShortCode(message) => Self::InvalidShortCode(message),
        }
    }
}
