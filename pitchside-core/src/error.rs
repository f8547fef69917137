//! Unified error handling for the site
//!
//! One taxonomy covers the auth flow, the stores, the feed fetcher and the
//! mailer. Nothing in here is fatal to the process; every variant is a
//! per-request condition.

use thiserror::Error;
use tracing::{error, warn};

pub type SiteResult<T> = Result<T, SiteError>;

/// Main error type for the Pitchside site
#[derive(Error, Debug)]
pub enum SiteError {
    /// A user record with this username already exists.
    #[error("username '{username}' is already taken")]
    DuplicateUsername { username: String },

    /// Wrong password or unknown username. Deliberately one variant for
    /// both cases so callers cannot enumerate usernames.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// A protected operation was reached without a valid session.
    #[error("authentication required")]
    Unauthenticated,

    /// The document store failed or is unreachable.
    #[error("storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The feed source could not be fetched or parsed.
    #[error("feed error: {message}")]
    Feed {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Outbound mail could not be built or delivered.
    #[error("mail error: {message}")]
    Mail {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Bad or missing configuration value.
    #[error("configuration error: {0}")]
    Config(String),

    /// Unexpected internal failure (hashing, token signing and the like).
    #[error("internal error: {message}")]
    Internal { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SiteError {
    /// Shorthand for a storage failure without a typed source
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a feed failure without a typed source
    pub fn feed(message: impl Into<String>) -> Self {
        Self::Feed {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a mail failure without a typed source
    pub fn mail(message: impl Into<String>) -> Self {
        Self::Mail {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for an internal failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the condition is expected to clear on retry
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SiteError::Storage { .. } | SiteError::Feed { .. } | SiteError::Mail { .. }
        )
    }

    /// Whether the error may be shown to the user as a form message
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            SiteError::DuplicateUsername { .. }
                | SiteError::InvalidCredentials
                | SiteError::Unauthenticated
        )
    }

    /// Log the error at the appropriate level
    pub fn log(&self) {
        match self {
            SiteError::Storage { .. } | SiteError::Feed { .. } | SiteError::Mail { .. } => {
                warn!(error = %self, "Collaborator failure (best-effort path)");
            }
            SiteError::Config(_) | SiteError::Io(_) | SiteError::Serialization(_) => {
                error!(error = %self, "Error occurred");
            }
            _ => {
                warn!(error = %self, "Request rejected");
            }
        }
    }
}
