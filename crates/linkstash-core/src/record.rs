use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A stored URL record.
///
/// `expires_at` is fixed at creation time; `click_count` always equals
/// the length of the click log owned by the same short code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// The short code this record is keyed by.
    pub shortcode: ShortCode,
    /// The normalized original URL that was shortened.
    pub original_url: String,
    /// When the record was created.
    pub created_at: Timestamp,
    /// When the record expires. Immutable after creation.
    pub expires_at: Timestamp,
    /// The validity window used to compute `expires_at`, in minutes.
    pub validity_minutes: u32,
    /// Number of recorded clicks.
    pub click_count: u64,
    /// Flipped to `false` once a read observes the record past `expires_at`.
    pub is_active: bool,
}

impl UrlRecord {
    /// Whether the record has expired as of the given instant.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now > self.expires_at
    }
}
