//! Document store access for users and contact messages
//!
//! Two independent collections behind enum stores: an in-memory variant for
//! development and tests, and a SQLite variant for deployments. The stores
//! expose exactly the operations the site needs: exact-match lookup and
//! insert. No transactions are used; username uniqueness is enforced by the
//! storage layer itself (a UNIQUE column in SQLite, a single write-lock
//! critical section in memory).

pub mod sqlite;

use pitchside_core::{ContactMessage, SiteError, SiteResult, UserRecord};
use sqlite::{SqliteContactStore, SqliteUserStore};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// User collection
#[derive(Debug, Clone)]
pub enum UserStore {
    /// In-memory storage (for development and testing)
    Memory(Arc<RwLock<HashMap<String, UserRecord>>>),
    /// SQLite storage (for production)
    Sqlite(SqliteUserStore),
}

impl Default for UserStore {
    fn default() -> Self {
        Self::memory()
    }
}

impl UserStore {
    /// Create an in-memory user store
    pub fn memory() -> Self {
        Self::Memory(Arc::new(RwLock::new(HashMap::new())))
    }

    /// Look up a user by username. Exact match, no case folding.
    pub async fn find_by_username(&self, username: &str) -> SiteResult<Option<UserRecord>> {
        match self {
            Self::Memory(users) => {
                let users = users.read().await;
                Ok(users.get(username).cloned())
            }
            Self::Sqlite(store) => store.find_by_username(username).await,
        }
    }

    /// Insert a new user record.
    ///
    /// Fails with [`SiteError::DuplicateUsername`] when the username is
    /// taken. For the memory variant the existence check and the insert
    /// happen under one write lock, so concurrent registrations of the same
    /// name cannot both succeed.
    pub async fn insert(&self, record: UserRecord) -> SiteResult<()> {
        match self {
            Self::Memory(users) => {
                let mut users = users.write().await;
                if users.contains_key(&record.username) {
                    return Err(SiteError::DuplicateUsername {
                        username: record.username,
                    });
                }
                debug!(username = %record.username, "Inserting user record");
                users.insert(record.username.clone(), record);
                Ok(())
            }
            Self::Sqlite(store) => store.insert(record).await,
        }
    }
}

/// Contact message collection. Write-only from the site's point of view.
#[derive(Debug, Clone)]
pub enum ContactStore {
    Memory(Arc<RwLock<Vec<ContactMessage>>>),
    Sqlite(SqliteContactStore),
}

impl Default for ContactStore {
    fn default() -> Self {
        Self::memory()
    }
}

impl ContactStore {
    /// Create an in-memory contact store
    pub fn memory() -> Self {
        Self::Memory(Arc::new(RwLock::new(Vec::new())))
    }

    /// Persist one contact message
    pub async fn insert(&self, message: ContactMessage) -> SiteResult<()> {
        match self {
            Self::Memory(messages) => {
                let mut messages = messages.write().await;
                debug!(name = %message.name, "Storing contact message");
                messages.push(message);
                Ok(())
            }
            Self::Sqlite(store) => store.insert(message).await,
        }
    }

    /// Number of stored messages (memory variant only, used by tests)
    pub async fn len(&self) -> SiteResult<usize> {
        match self {
            Self::Memory(messages) => Ok(messages.read().await.len()),
            Self::Sqlite(store) => store.count().await,
        }
    }
}
