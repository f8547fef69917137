//! SQLite-backed storage implementation

use chrono::{DateTime, Utc};
use pitchside_core::{ContactMessage, SiteError, SiteResult, UserRecord};
use sqlx::{sqlite::SqlitePoolOptions, Row, SqlitePool};
use tracing::{debug, error, info};

/// Connect to the database and prepare both collections.
pub async fn connect(url: &str) -> SiteResult<(SqliteUserStore, SqliteContactStore)> {
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(url)
        .await
        .map_err(|e| SiteError::Storage {
            message: format!("failed to connect to {url}"),
            source: Some(Box::new(e)),
        })?;

    let users = SqliteUserStore::new(pool.clone()).await?;
    let contacts = SqliteContactStore::new(pool).await?;

    info!(url = %url, "Connected to SQLite storage");
    Ok((users, contacts))
}

fn storage_error(message: &str, e: sqlx::Error) -> SiteError {
    error!(error = %e, "{message}");
    SiteError::Storage {
        message: message.to_string(),
        source: Some(Box::new(e)),
    }
}

/// SQLite user collection
#[derive(Debug, Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    /// Create the store and its table.
    ///
    /// The UNIQUE constraint on username is what closes the original
    /// check-then-insert race: a losing concurrent insert surfaces as a
    /// unique violation and is reported as a duplicate username.
    pub async fn new(pool: SqlitePool) -> SiteResult<Self> {
        let query = r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_users_username ON users(username);
        "#;

        sqlx::query(query)
            .execute(&pool)
            .await
            .map_err(|e| storage_error("failed to create users table", e))?;

        Ok(Self { pool })
    }

    /// Insert a user record
    pub async fn insert(&self, record: UserRecord) -> SiteResult<()> {
        let query = r#"
            INSERT INTO users (id, username, password_hash, created_at)
            VALUES (?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&record.id)
            .bind(&record.username)
            .bind(&record.password_hash)
            .bind(record.created_at.to_rfc3339())
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => {
                debug!(username = %record.username, "User inserted");
                Ok(())
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(SiteError::DuplicateUsername {
                    username: record.username,
                })
            }
            Err(e) => Err(storage_error("failed to insert user", e)),
        }
    }

    /// Look up a user by username (exact match)
    pub async fn find_by_username(&self, username: &str) -> SiteResult<Option<UserRecord>> {
        let row = sqlx::query("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("failed to query user by username", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let created_at: String = row.get("created_at");
        let created_at: DateTime<Utc> = created_at
            .parse()
            .map_err(|_| SiteError::storage("invalid created_at in users table"))?;

        Ok(Some(UserRecord {
            id: row.get("id"),
            username: row.get("username"),
            password_hash: row.get("password_hash"),
            created_at,
        }))
    }
}

/// SQLite contact message collection
#[derive(Debug, Clone)]
pub struct SqliteContactStore {
    pool: SqlitePool,
}

impl SqliteContactStore {
    pub async fn new(pool: SqlitePool) -> SiteResult<Self> {
        let query = r#"
            CREATE TABLE IF NOT EXISTS contacts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                message TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
        "#;

        sqlx::query(query)
            .execute(&pool)
            .await
            .map_err(|e| storage_error("failed to create contacts table", e))?;

        Ok(Self { pool })
    }

    /// Insert one contact message
    pub async fn insert(&self, message: ContactMessage) -> SiteResult<()> {
        sqlx::query("INSERT INTO contacts (name, email, message, created_at) VALUES (?, ?, ?, ?)")
            .bind(&message.name)
            .bind(&message.email)
            .bind(&message.message)
            .bind(message.created_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("failed to insert contact message", e))?;

        debug!(name = %message.name, "Contact message stored");
        Ok(())
    }

    /// Count stored messages
    pub async fn count(&self) -> SiteResult<usize> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM contacts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("failed to count contact messages", e))?;

        let count: i64 = row.get("count");
        Ok(count as usize)
    }

    /// Underlying pool, exposed for integration tests that simulate an
    /// unavailable store by closing it.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
