//! URL record store for the Linkstash URL shortener.
//!
//! This crate owns the persisted document (records, click logs, and the
//! allocated shortcode set), the storage backend abstraction, and the
//! [`UrlStore`] service that implements creation, lookup, deletion,
//! expiry sweeping, and click recording on top of it.

pub mod backend;
pub mod document;
pub mod error;
pub mod generator;
pub mod store;

pub use backend::json_file::JsonFileBackend;
pub use backend::memory::InMemoryBackend;
pub use backend::StorageBackend;
pub use document::Document;
pub use error::{StorageError, StoreError};
pub use generator::{CodeGenerator, RandomGenerator};
pub use store::{
    CreateRequest, Created, Retrieved, UrlSnapshot, UrlStore, DEFAULT_VALIDITY_MINUTES,
    GENERATED_CODE_LENGTH, MAX_VALIDITY_MINUTES,
};
