pub mod json_file;
pub mod memory;

use crate::document::Document;
use crate::error::StorageError;
use async_trait::async_trait;

/// Persistence backend for the store document.
///
/// Backends load and save the whole document at once. There is no
/// cross-process locking: two processes sharing a backend overwrite
/// each other last-write-wins, which is an accepted limitation of the
/// single-user scope.
#[async_trait]
pub trait StorageBackend: Send + Sync + 'static {
    /// Loads the persisted document. A backend with nothing persisted
    /// yet returns the empty document.
    async fn load(&self) -> Result<Document, StorageError>;

    /// Persists the document, replacing whatever was stored before.
    async fn save(&self, document: &Document) -> Result<(), StorageError>;
}
