//! Credential verification and account registration

use super::session;
use crate::storage::UserStore;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use pitchside_core::{SiteError, SiteResult, UserRecord};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// User registration form
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// User login form
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Auth service: turns raw credentials into a stored identity plus a
/// session token.
#[derive(Debug, Clone, Default)]
pub struct AuthService {
    store: UserStore,
}

impl AuthService {
    pub fn new(store: UserStore) -> Self {
        Self { store }
    }

    /// Register a new user and establish a session.
    ///
    /// The plaintext password only exists on this stack frame; it is
    /// salted and hashed before anything is persisted or logged.
    pub async fn register(&self, request: RegisterRequest) -> SiteResult<(UserRecord, String)> {
        if request.username.is_empty() || request.password.is_empty() {
            debug!("Registration rejected: empty username or password");
            return Err(SiteError::InvalidCredentials);
        }

        let password_hash = hash_password(&request.password)?;
        let record = UserRecord::new(request.username, password_hash);

        // Uniqueness is enforced by the store itself.
        self.store.insert(record.clone()).await?;

        let token = session::issue(&record)?;
        info!(username = %record.username, "Registered new user");
        Ok((record, token))
    }

    /// Verify credentials and establish a session.
    ///
    /// Unknown username and wrong password produce the same error so the
    /// login form cannot be used to enumerate accounts.
    pub async fn authenticate(&self, request: LoginRequest) -> SiteResult<(UserRecord, String)> {
        let record = self
            .store
            .find_by_username(&request.username)
            .await?
            .ok_or(SiteError::InvalidCredentials)?;

        if !verify_password(&request.password, &record.password_hash) {
            warn!(username = %request.username, "Password verification failed");
            return Err(SiteError::InvalidCredentials);
        }

        let token = session::issue(&record)?;
        debug!(username = %record.username, "User authenticated");
        Ok((record, token))
    }

    /// Access the backing store (for tests)
    pub fn store(&self) -> &UserStore {
        &self.store
    }
}

/// Hash a password using Argon2 with a fresh per-record salt
fn hash_password(password: &str) -> SiteResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| SiteError::internal("password hashing failed"))
}

/// Verify a password against a stored hash
fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
