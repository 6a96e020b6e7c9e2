use crate::aggregate::{clicks_by_date, clicks_by_source};
use linkstash_core::{ClickEvent, Clock, ShortCode, UrlRecord};
use linkstash_store::{CodeGenerator, StorageBackend, UrlStore};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::trace;

/// Per-shortcode statistics: the record, its full click log, and the
/// derived groupings.
#[derive(Debug, Clone)]
pub struct UrlStats {
    pub record: UrlRecord,
    pub short_url: String,
    pub is_expired: bool,
    pub clicks: Vec<ClickEvent>,
    /// Click counts keyed by derived source label.
    pub clicks_by_source: HashMap<String, u64>,
    /// Click counts keyed by UTC calendar date.
    pub clicks_by_date: BTreeMap<String, u64>,
}

/// Derives statistics from store state.
#[derive(Debug, Clone)]
pub struct StatsService<B, G, C> {
    store: Arc<UrlStore<B, G, C>>,
}

impl<B: StorageBackend, G: CodeGenerator, C: Clock> StatsService<B, G, C> {
    /// Creates a stats service reading from the given store.
    pub fn new(store: Arc<UrlStore<B, G, C>>) -> Self {
        Self { store }
    }

    /// Returns statistics for one shortcode, or `None` if it does not
    /// exist. Pure read; expiry state is reported but never mutated.
    pub async fn stats_for(&self, code: &ShortCode) -> Option<UrlStats> {
        trace!(code = %code, "aggregating click stats");
        let snapshot = self.store.snapshot(code).await?;

        Some(UrlStats {
            clicks_by_source: clicks_by_source(&snapshot.clicks),
            clicks_by_date: clicks_by_date(&snapshot.clicks),
            record: snapshot.record,
            short_url: snapshot.short_url,
            is_expired: snapshot.is_expired,
            clicks: snapshot.clicks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::{SignedDuration, Timestamp};
    use linkstash_core::{ClickContext, ManualClock};
    use linkstash_store::{CreateRequest, InMemoryBackend, RandomGenerator};

    async fn setup() -> (
        StatsService<InMemoryBackend, RandomGenerator, ManualClock>,
        Arc<UrlStore<InMemoryBackend, RandomGenerator, ManualClock>>,
        ManualClock,
    ) {
        let clock = ManualClock::new(Timestamp::from_second(1_700_000_000).unwrap());
        let store = Arc::new(
            UrlStore::open_with(
                InMemoryBackend::new(),
                RandomGenerator,
                clock.clone(),
                "http://localhost:3000",
            )
            .await,
        );
        (StatsService::new(Arc::clone(&store)), store, clock)
    }

    fn referrer_ctx(referrer: &str) -> ClickContext {
        ClickContext::builder().referrer(referrer).build()
    }

    #[tokio::test]
    async fn stats_for_unknown_code_is_none() {
        let (stats, _, _) = setup().await;
        assert!(stats.stats_for(&ShortCode::new_unchecked("nope42")).await.is_none());
    }

    #[tokio::test]
    async fn stats_reflect_clicks_and_groupings() {
        let (stats, store, clock) = setup().await;

        let created = store
            .create(
                CreateRequest::builder()
                    .original_url("https://example.com")
                    .validity_minutes(10_000)
                    .build(),
            )
            .await
            .unwrap();
        let code = created.record.shortcode.clone();

        store
            .record_click(&code, &referrer_ctx("https://www.google.com/"))
            .await
            .unwrap();
        store
            .record_click(&code, &referrer_ctx("https://www.google.com/"))
            .await
            .unwrap();
        clock.advance(SignedDuration::from_hours(24));
        store
            .record_click(&code, &ClickContext::default())
            .await
            .unwrap();

        let result = stats.stats_for(&code).await.unwrap();
        assert_eq!(result.record.click_count, 3);
        assert_eq!(result.clicks.len(), 3);
        assert_eq!(result.clicks_by_source.get("Google"), Some(&2));
        assert_eq!(result.clicks_by_source.get("Direct"), Some(&1));
        assert_eq!(result.clicks_by_date.len(), 2);

        // Both groupings always sum to the total click count.
        let by_source: u64 = result.clicks_by_source.values().sum();
        let by_date: u64 = result.clicks_by_date.values().sum();
        assert_eq!(by_source, result.record.click_count);
        assert_eq!(by_date, result.record.click_count);
    }

    #[tokio::test]
    async fn stats_report_expiry_without_mutating_it() {
        let (stats, store, clock) = setup().await;

        let created = store
            .create(
                CreateRequest::builder()
                    .original_url("https://example.com")
                    .validity_minutes(1)
                    .build(),
            )
            .await
            .unwrap();
        let code = created.record.shortcode.clone();

        clock.advance(SignedDuration::from_secs(61));

        let result = stats.stats_for(&code).await.unwrap();
        assert!(result.is_expired);
        // The read did not flip the stored activity flag.
        assert!(result.record.is_active);
    }
}
