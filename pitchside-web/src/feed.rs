//! Cached news feed fetching
//!
//! One process-wide cache slot with a TTL, shared by every request. The
//! snapshot (items + fetch time) is replaced as a single value, so a
//! concurrent reader sees either the old entry or the new one, never a
//! half-written mix. Refresh failures serve the previous snapshot
//! (stale-if-error) and never surface to the caller.
//!
//! The slot is deliberately not keyed by source URL: only the news page
//! reads through it. Pointing two different sources at the same cache
//! would make them overwrite each other.

use async_trait::async_trait;
use pitchside_core::{FeedItem, SiteError, SiteResult};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Time source abstraction so TTL behavior is testable without sleeping
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A fetchable, parseable feed of ordered entries
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch and parse the feed at `url`, in document order
    async fn fetch(&self, url: &str) -> SiteResult<Vec<FeedItem>>;
}

/// HTTP feed source backed by reqwest and an RSS parser
pub struct HttpFeedSource {
    client: reqwest::Client,
}

impl HttpFeedSource {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpFeedSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self, url: &str) -> SiteResult<Vec<FeedItem>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| SiteError::Feed {
                message: format!("failed to fetch {url}"),
                source: Some(Box::new(e)),
            })?;

        let body = response.bytes().await.map_err(|e| SiteError::Feed {
            message: format!("failed to read body from {url}"),
            source: Some(Box::new(e)),
        })?;

        let channel = rss::Channel::read_from(&body[..]).map_err(|e| SiteError::Feed {
            message: format!("malformed feed at {url}"),
            source: Some(Box::new(e)),
        })?;

        Ok(channel
            .items()
            .iter()
            .map(|entry| FeedItem {
                title: entry.title().unwrap_or_default().to_string(),
                link: entry.link().unwrap_or_default().to_string(),
                published: entry.pub_date().unwrap_or_default().to_string(),
                description: entry.description().unwrap_or_default().to_string(),
            })
            .collect())
    }
}

/// The cached snapshot: items and their fetch time, replaced together
struct Snapshot {
    items: Arc<Vec<FeedItem>>,
    fetched_at: Instant,
}

/// Single-slot TTL cache over a [`FeedSource`]
pub struct FeedCache {
    slot: RwLock<Option<Snapshot>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl FeedCache {
    /// Create a cache with the given TTL, on wall-clock time
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Create a cache with an injected clock (for tests)
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
            clock,
        }
    }

    /// Return cached items while fresh; otherwise fetch, truncate to
    /// `max_items`, replace the snapshot and return the new items.
    ///
    /// On fetch failure the previous snapshot (if any) is served untouched
    /// and the result degrades to empty when there is none. Never errors.
    pub async fn get_items(
        &self,
        source: &dyn FeedSource,
        url: &str,
        max_items: usize,
    ) -> Vec<FeedItem> {
        if let Some(items) = self.fresh_items() {
            debug!(count = items.len(), "Feed cache hit");
            return items;
        }

        match source.fetch(url).await {
            Ok(mut items) => {
                items.truncate(max_items);
                let items = Arc::new(items);

                let mut slot = self.slot.write().unwrap();
                *slot = Some(Snapshot {
                    items: Arc::clone(&items),
                    fetched_at: self.clock.now(),
                });

                debug!(count = items.len(), url = %url, "Feed cache refreshed");
                items.as_ref().clone()
            }
            Err(e) => {
                warn!(error = %e, url = %url, "Feed refresh failed, serving stale");
                self.stale_items()
            }
        }
    }

    /// Items from a non-empty, unexpired snapshot
    fn fresh_items(&self) -> Option<Vec<FeedItem>> {
        let slot = self.slot.read().unwrap();
        let snapshot = slot.as_ref()?;

        if snapshot.items.is_empty() {
            return None;
        }
        if self.clock.now().duration_since(snapshot.fetched_at) >= self.ttl {
            return None;
        }

        Some(snapshot.items.as_ref().clone())
    }

    /// Whatever the slot currently holds, regardless of age
    fn stale_items(&self) -> Vec<FeedItem> {
        let slot = self.slot.read().unwrap();
        slot.as_ref()
            .map(|snapshot| snapshot.items.as_ref().clone())
            .unwrap_or_default()
    }
}
