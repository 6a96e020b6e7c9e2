use crate::backend::StorageBackend;
use crate::document::Document;
use crate::error::StorageError;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-memory implementation of the [`StorageBackend`] trait.
///
/// Clones share the same underlying document, so a store reopened on a
/// clone of the backend sees everything the first store persisted.
/// Intended as a test double for the file backend.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    document: Arc<Mutex<Document>>,
}

impl InMemoryBackend {
    /// Creates a backend holding the empty document.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for InMemoryBackend {
    async fn load(&self) -> Result<Document, StorageError> {
        Ok(self.document.lock().await.clone())
    }

    async fn save(&self, document: &Document) -> Result<(), StorageError> {
        *self.document.lock().await = document.clone();
        Ok(())
    }
}
