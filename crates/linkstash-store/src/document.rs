use linkstash_core::{ClickEvent, UrlRecord};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// The whole persisted store: records, click logs, and the allocated
/// shortcode set.
///
/// The document is read-modified-written as a unit on every mutation.
/// `shortcodes` serializes as an array and is rebuilt as a set on load,
/// so set semantics survive the round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Map of shortcode to its URL record.
    pub urls: HashMap<String, UrlRecord>,
    /// Map of shortcode to its ordered, append-only click log.
    pub clicks: HashMap<String, Vec<ClickEvent>>,
    /// Set of every allocated shortcode.
    pub shortcodes: HashSet<String>,
}

impl Document {
    /// Whether a shortcode is present in the allocated set or as a record key.
    pub fn contains(&self, code: &str) -> bool {
        self.shortcodes.contains(code) || self.urls.contains_key(code)
    }
}
