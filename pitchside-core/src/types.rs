//! Core data type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user. Created once on registration, never mutated or
/// deleted afterwards. The password hash is a salted argon2 string and is
/// never the plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Opaque identifier (uuid v4 string)
    pub id: String,
    /// Unique across all users, compared exact-match (no case folding)
    pub username: String,
    /// Salted one-way hash, PHC string format
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            username,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// A contact form submission. Write-only audit trail: stored on submit,
/// never read back, mutated or deleted by this system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ContactMessage {
    pub fn new(name: String, email: String, message: String) -> Self {
        Self {
            name,
            email,
            message,
            created_at: Utc::now(),
        }
    }
}

/// One entry of a fetched news feed, in feed order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    /// Publication date as the feed reported it; empty when absent
    pub published: String,
    /// Entry summary; the live-scores feed carries the state of play here
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_records_get_distinct_ids() {
        let a = UserRecord::new("alice".into(), "hash-a".into());
        let b = UserRecord::new("alice".into(), "hash-b".into());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn contact_message_carries_a_timestamp() {
        let msg = ContactMessage::new("Bob".into(), "bob@example.com".into(), "Hi".into());
        assert!(msg.created_at <= Utc::now());
    }
}
