use crate::error::Result;
use linkstash_core::{ClickContext, Clock, ShortCode, UrlRecord};
use linkstash_store::{CodeGenerator, StorageBackend, UrlStore};
use std::sync::Arc;
use tracing::{debug, trace};

/// Terminal states of one resolution attempt.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// The shortcode was never allocated.
    NotFound,
    /// The shortcode exists but its validity window has lapsed.
    Expired,
    /// The shortcode resolved; a click has been recorded.
    Ready(ReadyRedirect),
}

/// A successful resolution, carrying the destination.
#[derive(Debug, Clone)]
pub struct ReadyRedirect {
    pub original_url: String,
    pub record: UrlRecord,
}

/// Service for resolving short links to their destinations.
///
/// Each call to [`resolve`] records at most one click; callers that
/// re-render an already resolved redirect must reuse the returned
/// [`Resolution`] instead of resolving again.
///
/// [`resolve`]: ResolverService::resolve
#[derive(Debug, Clone)]
pub struct ResolverService<B, G, C> {
    store: Arc<UrlStore<B, G, C>>,
}

impl<B: StorageBackend, G: CodeGenerator, C: Clock> ResolverService<B, G, C> {
    /// Creates a resolver over the given store.
    pub fn new(store: Arc<UrlStore<B, G, C>>) -> Self {
        Self { store }
    }

    /// Resolves a shortcode, recording the click on success.
    ///
    /// Store failures (e.g. the backend refusing to persist the click)
    /// surface as [`ResolveError`](crate::ResolveError); everything
    /// else maps onto a [`Resolution`] state.
    pub async fn resolve(&self, code: &ShortCode, ctx: &ClickContext) -> Result<Resolution> {
        trace!(code = %code, "resolving short code");

        let Some(retrieved) = self.store.get(code).await? else {
            debug!(code = %code, "short code not found");
            return Ok(Resolution::NotFound);
        };

        if retrieved.is_expired {
            debug!(code = %code, "short code has expired");
            return Ok(Resolution::Expired);
        }

        // A click that is refused here means the record expired between
        // the lookup and the recording; treat it as an expired target.
        if !self.store.record_click(code, ctx).await? {
            debug!(code = %code, "click refused, treating as expired");
            return Ok(Resolution::Expired);
        }

        debug!(code = %code, url = %retrieved.record.original_url, "resolved short code");
        Ok(Resolution::Ready(ReadyRedirect {
            original_url: retrieved.record.original_url.clone(),
            record: retrieved.record,
        }))
    }
}
