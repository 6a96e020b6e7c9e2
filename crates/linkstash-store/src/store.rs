use crate::backend::StorageBackend;
use crate::document::Document;
use crate::error::{Result, StoreError};
use crate::generator::{CodeGenerator, RandomGenerator};
use jiff::{SignedDuration, Timestamp};
use linkstash_core::{ClickContext, ClickEvent, Clock, ShortCode, SystemClock, UrlRecord};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use typed_builder::TypedBuilder;
use url::Url;

/// Default validity window for a new short URL, in minutes.
pub const DEFAULT_VALIDITY_MINUTES: u32 = 30;
/// Upper bound on the validity window (30 days). The store uses the
/// value as given; enforcing the bound is the caller's job.
pub const MAX_VALIDITY_MINUTES: u32 = 43_200;
/// Length of generated shortcodes.
pub const GENERATED_CODE_LENGTH: usize = 6;

const MAX_GENERATION_ATTEMPTS: usize = 1000;

/// Parameters for creating a short URL.
#[derive(Debug, Clone, TypedBuilder)]
pub struct CreateRequest {
    /// The URL to shorten. `https://` is prepended when no scheme is given.
    #[builder(setter(into))]
    pub original_url: String,
    /// Optional custom shortcode; validated for format and uniqueness.
    #[builder(default, setter(strip_option, into))]
    pub custom_shortcode: Option<String>,
    /// Validity window in minutes.
    #[builder(default = DEFAULT_VALIDITY_MINUTES)]
    pub validity_minutes: u32,
}

/// A freshly created short URL.
#[derive(Debug, Clone)]
pub struct Created {
    pub record: UrlRecord,
    /// The derived absolute short link, `<base-url>/<shortcode>`.
    pub short_url: String,
}

/// Result of looking up a shortcode that exists.
///
/// An expired record is returned tagged rather than treated as missing,
/// so callers can distinguish "never existed" from "expired".
#[derive(Debug, Clone)]
pub struct Retrieved {
    pub record: UrlRecord,
    pub is_expired: bool,
}

/// A read-only view of a record together with its click log.
#[derive(Debug, Clone)]
pub struct UrlSnapshot {
    pub record: UrlRecord,
    pub short_url: String,
    pub clicks: Vec<ClickEvent>,
    pub is_expired: bool,
}

/// The URL record store.
///
/// Owns the persisted [`Document`] and pushes it through the backend as
/// a whole on every mutation. All operations take `&self`; mutations
/// run under a single write lock, so each one is atomic with respect to
/// other calls on the same store.
#[derive(Debug)]
pub struct UrlStore<B, G = RandomGenerator, C = SystemClock> {
    backend: B,
    generator: G,
    clock: C,
    base_url: String,
    state: RwLock<Document>,
}

impl<B: StorageBackend> UrlStore<B> {
    /// Opens a store on the given backend with the default generator
    /// and the wall clock.
    pub async fn open(backend: B, base_url: impl Into<String>) -> Self {
        Self::open_with(backend, RandomGenerator, SystemClock, base_url).await
    }
}

impl<B: StorageBackend, G: CodeGenerator, C: Clock> UrlStore<B, G, C> {
    /// Opens a store with explicit generator and clock.
    ///
    /// A corrupt or unreadable persisted document is logged and replaced
    /// by the empty document; opening never fails.
    pub async fn open_with(
        backend: B,
        generator: G,
        clock: C,
        base_url: impl Into<String>,
    ) -> Self {
        let document = match backend.load().await {
            Ok(document) => document,
            Err(e) => {
                warn!(error = %e, "failed to load persisted document, starting empty");
                Document::default()
            }
        };

        Self {
            backend,
            generator,
            clock,
            base_url: base_url.into(),
            state: RwLock::new(document),
        }
    }

    /// The base URL short links are derived from.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Creates a new short URL.
    pub async fn create(&self, request: CreateRequest) -> Result<Created> {
        let original_url = normalize_url(&request.original_url)?;
        let mut doc = self.state.write().await;

        let shortcode = match request.custom_shortcode {
            Some(raw) => {
                let code = ShortCode::new(raw)?;
                if doc.contains(code.as_str()) {
                    return Err(StoreError::ShortcodeTaken(code.to_string()));
                }
                code
            }
            None => self.allocate(&doc),
        };

        let created_at = self.clock.now();
        let expires_at =
            created_at + SignedDuration::from_mins(i64::from(request.validity_minutes));
        let record = UrlRecord {
            shortcode: shortcode.clone(),
            original_url,
            created_at,
            expires_at,
            validity_minutes: request.validity_minutes,
            click_count: 0,
            is_active: true,
        };

        doc.urls.insert(shortcode.as_str().to_owned(), record.clone());
        doc.shortcodes.insert(shortcode.as_str().to_owned());
        doc.clicks.insert(shortcode.as_str().to_owned(), Vec::new());
        self.persist(&doc).await?;

        debug!(code = %shortcode, url = %record.original_url, "created short url");
        let short_url = shortcode.to_url(&self.base_url);
        Ok(Created { record, short_url })
    }

    /// Looks up a shortcode.
    ///
    /// Returns `None` for a code that never existed. An expired record
    /// comes back tagged `is_expired`; the first expired read flips
    /// `is_active` to false and persists the flip.
    pub async fn get(&self, code: &ShortCode) -> Result<Option<Retrieved>> {
        let now = self.clock.now();
        let mut doc = self.state.write().await;

        let Some(record) = doc.urls.get_mut(code.as_str()) else {
            return Ok(None);
        };

        if !record.is_expired_at(now) {
            return Ok(Some(Retrieved {
                record: record.clone(),
                is_expired: false,
            }));
        }

        let flipped = record.is_active;
        record.is_active = false;
        let record = record.clone();
        if flipped {
            self.persist(&doc).await?;
        }
        Ok(Some(Retrieved {
            record,
            is_expired: true,
        }))
    }

    /// Records a click against a shortcode.
    ///
    /// Returns `false` without mutating anything when the code is
    /// unknown or already expired; expired targets never accumulate
    /// clicks.
    pub async fn record_click(&self, code: &ShortCode, ctx: &ClickContext) -> Result<bool> {
        let now = self.clock.now();
        let mut doc = self.state.write().await;

        let Some(record) = doc.urls.get_mut(code.as_str()) else {
            debug!(code = %code, "click on unknown shortcode ignored");
            return Ok(false);
        };
        if record.is_expired_at(now) {
            debug!(code = %code, "click on expired shortcode ignored");
            return Ok(false);
        }
        record.click_count += 1;

        let event = ClickEvent::from_context(ctx, now);
        doc.clicks
            .entry(code.as_str().to_owned())
            .or_default()
            .push(event);
        self.persist(&doc).await?;

        debug!(code = %code, "recorded click");
        Ok(true)
    }

    /// Deletes a short URL and its click log. Idempotent.
    pub async fn delete(&self, code: &ShortCode) -> Result<bool> {
        let mut doc = self.state.write().await;
        if doc.urls.remove(code.as_str()).is_none() {
            return Ok(false);
        }
        doc.clicks.remove(code.as_str());
        doc.shortcodes.remove(code.as_str());
        self.persist(&doc).await?;

        debug!(code = %code, "deleted short url");
        Ok(true)
    }

    /// Deletes every record whose expiry has passed. Returns the number
    /// of records removed.
    pub async fn sweep_expired(&self) -> Result<usize> {
        let now = self.clock.now();
        let mut doc = self.state.write().await;

        let expired: Vec<String> = doc
            .urls
            .iter()
            .filter(|(_, record)| record.expires_at < now)
            .map(|(code, _)| code.clone())
            .collect();

        for code in &expired {
            doc.urls.remove(code);
            doc.clicks.remove(code);
            doc.shortcodes.remove(code);
        }

        if !expired.is_empty() {
            self.persist(&doc).await?;
            debug!(count = expired.len(), "swept expired short urls");
        }
        Ok(expired.len())
    }

    /// Returns every record with its click log, newest first.
    pub async fn list_all(&self) -> Vec<UrlSnapshot> {
        let now = self.clock.now();
        let doc = self.state.read().await;

        let mut all: Vec<UrlSnapshot> = doc
            .urls
            .values()
            .map(|record| self.snapshot_of(&doc, record, now))
            .collect();
        all.sort_by(|a, b| b.record.created_at.cmp(&a.record.created_at));
        all
    }

    /// Read-only view of one record and its click log. Unlike [`get`],
    /// this never mutates expiry state.
    ///
    /// [`get`]: UrlStore::get
    pub async fn snapshot(&self, code: &ShortCode) -> Option<UrlSnapshot> {
        let now = self.clock.now();
        let doc = self.state.read().await;
        doc.urls
            .get(code.as_str())
            .map(|record| self.snapshot_of(&doc, record, now))
    }

    /// Whether a shortcode is taken (allocated set or record key).
    pub async fn exists(&self, code: &ShortCode) -> bool {
        self.state.read().await.contains(code.as_str())
    }

    fn snapshot_of(&self, doc: &Document, record: &UrlRecord, now: Timestamp) -> UrlSnapshot {
        UrlSnapshot {
            short_url: record.shortcode.to_url(&self.base_url),
            clicks: doc
                .clicks
                .get(record.shortcode.as_str())
                .cloned()
                .unwrap_or_default(),
            is_expired: record.is_expired_at(now),
            record: record.clone(),
        }
    }

    fn allocate(&self, document: &Document) -> ShortCode {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let candidate = self.generator.candidate(GENERATED_CODE_LENGTH);
            if !document.contains(candidate.as_str()) {
                return candidate;
            }
        }

        // Last resort: the tail of the base-36 encoded timestamp. Not
        // guaranteed unique; a same-millisecond collision reuses an
        // existing code.
        warn!("shortcode generation exhausted retries, falling back to timestamp code");
        timestamp_fallback(self.clock.now())
    }

    async fn persist(&self, document: &Document) -> Result<()> {
        self.backend.save(document).await.map_err(StoreError::from)
    }
}

/// Prepends `https://` when no scheme is given and validates the result.
fn normalize_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(StoreError::InvalidUrl("URL cannot be empty".to_string()));
    }

    let normalized = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let parsed =
        Url::parse(&normalized).map_err(|e| StoreError::InvalidUrl(format!("{normalized}: {e}")))?;
    if !parsed.has_host() {
        return Err(StoreError::InvalidUrl(format!(
            "URL must have a host: {normalized}"
        )));
    }

    Ok(normalized)
}

fn timestamp_fallback(now: Timestamp) -> ShortCode {
    let encoded = to_base36(now.as_millisecond().unsigned_abs());
    let tail = encoded.len().saturating_sub(GENERATED_CODE_LENGTH);
    ShortCode::new_unchecked(&encoded[tail..])
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % 36) as usize] as char);
        value /= 36;
    }
    digits.iter().rev().collect()
}
