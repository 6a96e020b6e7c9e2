use linkstash_store::StoreError;
use thiserror::Error;

/// Result type for resolution attempts.
pub type Result<T> = std::result::Result<T, ResolveError>;

/// A resolution attempt that failed for reasons other than the target
/// being missing or expired (those are ordinary [`Resolution`] states).
///
/// [`Resolution`]: crate::resolver::Resolution
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    #[error("store error during resolution: {0}")]
    Store(#[from] StoreError),
}
