//! Application state wiring

use crate::{
    auth::users::AuthService,
    email::Mailer,
    feed::{FeedCache, FeedSource, HttpFeedSource},
    storage::{self, ContactStore, UserStore},
    WebConfig, WebResult,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Shared application state
///
/// The feed cache is the only in-process shared mutable state; everything
/// else is either immutable configuration or delegates to a collaborator.
#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: WebConfig,
    /// Credential and session management
    pub auth: AuthService,
    /// Contact message collection
    pub contacts: ContactStore,
    /// Outbound mail (possibly disabled)
    pub mailer: Arc<Mailer>,
    /// Shared single-slot news cache
    pub news_cache: Arc<FeedCache>,
    /// Feed fetcher used by both news and scores
    pub feed_source: Arc<dyn FeedSource>,
}

impl AppState {
    /// Create a new application state
    pub async fn new(config: WebConfig) -> WebResult<Self> {
        // SQLite when configured, in-memory otherwise. A connection
        // failure falls back to memory with a warning rather than refusing
        // to start.
        let (users, contacts) = match &config.database_url {
            Some(url) => match storage::sqlite::connect(url).await {
                Ok((users, contacts)) => {
                    (UserStore::Sqlite(users), ContactStore::Sqlite(contacts))
                }
                Err(e) => {
                    warn!(error = %e, "Failed to open database, falling back to in-memory stores");
                    (UserStore::memory(), ContactStore::memory())
                }
            },
            None => (UserStore::memory(), ContactStore::memory()),
        };

        let mailer = Arc::new(Mailer::from_config(&config));
        let news_cache = Arc::new(FeedCache::new(Duration::from_secs(config.cache_ttl_secs)));
        let feed_source: Arc<dyn FeedSource> = Arc::new(HttpFeedSource::new());

        let state = Self {
            auth: AuthService::new(users),
            contacts,
            mailer,
            news_cache,
            feed_source,
            config,
        };

        info!("Application state initialized");
        Ok(state)
    }
}
