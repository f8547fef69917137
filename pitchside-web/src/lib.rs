//! Pitchside Web Server
//!
//! A small community site: registration, login, a contact form, and cached
//! news/live-score feeds.

pub mod auth;
pub mod email;
pub mod feed;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;
pub mod storage;

// Re-export main types
pub use server::PitchsideServer;
pub use state::AppState;

pub use pitchside_core::logging::init_logging;

use axum::Router;
use tower_http::trace::TraceLayer;

/// Create the main application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        // API routes
        .nest("/api", routes::api_routes())
        // Site pages and form endpoints
        .merge(routes::page_routes())
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Configuration for the web server
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL (optional; in-memory stores when absent)
    pub database_url: Option<String>,
    /// News feed source URL
    pub news_feed_url: String,
    /// Live scores feed source URL
    pub scores_feed_url: String,
    /// News cache TTL in seconds
    pub cache_ttl_secs: u64,
    /// SMTP relay host
    pub smtp_server: String,
    /// SMTP credentials; mail is disabled when any of these three are empty
    pub smtp_user: String,
    pub smtp_password: String,
    pub smtp_to_email: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_url: None,
            news_feed_url: "https://news.google.com/rss/search?q=cricket".to_string(),
            scores_feed_url: "http://static.cricinfo.com/rss/livescores.xml".to_string(),
            cache_ttl_secs: 3600,
            smtp_server: "smtp.gmail.com".to_string(),
            smtp_user: String::new(),
            smtp_password: String::new(),
            smtp_to_email: String::new(),
        }
    }
}

impl WebConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: std::env::var("PITCHSIDE_HOST").unwrap_or(defaults.host),
            port: std::env::var("PITCHSIDE_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            database_url: std::env::var("DATABASE_URL").ok(),
            news_feed_url: std::env::var("NEWS_FEED_URL").unwrap_or(defaults.news_feed_url),
            scores_feed_url: std::env::var("SCORES_FEED_URL").unwrap_or(defaults.scores_feed_url),
            cache_ttl_secs: std::env::var("NEWS_CACHE_TTL")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.cache_ttl_secs),
            smtp_server: std::env::var("SMTP_SERVER").unwrap_or(defaults.smtp_server),
            smtp_user: std::env::var("SMTP_USER").unwrap_or_default(),
            smtp_password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
            smtp_to_email: std::env::var("SMTP_TO_EMAIL").unwrap_or_default(),
        }
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether outbound mail is configured
    pub fn mail_configured(&self) -> bool {
        !self.smtp_user.is_empty()
            && !self.smtp_password.is_empty()
            && !self.smtp_to_email.is_empty()
    }
}

/// Error types for the web server
#[derive(thiserror::Error, Debug)]
pub enum WebError {
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for web operations
pub type WebResult<T> = Result<T, WebError>;
