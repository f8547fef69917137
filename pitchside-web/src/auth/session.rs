//! Session token issuance and validation
//!
//! Tokens are HS256-signed claims; validity is solely "a well-formed,
//! unexpired token signed with our key exists for this request". Nothing
//! is tracked server-side, so logout is the client discarding its cookie.

use axum_extra::extract::cookie::Cookie;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use pitchside_core::{SiteError, SiteResult, UserRecord};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "session";

/// Session lifetime. The token is scoped to one browsing session; expiry
/// here is the backstop for clients that never discard it.
const SESSION_HOURS: i64 = 24;

/// Signing keys - initialized from the SECRET_KEY environment variable
static KEYS: LazyLock<Keys> = LazyLock::new(|| {
    let secret = std::env::var("SECRET_KEY").unwrap_or_else(|_| "change-me-locally".to_string());
    Keys::new(secret.as_bytes())
});

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl Keys {
    fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// Claims carried by a session token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Denormalized username
    pub username: String,
    /// Issued at (timestamp)
    pub iat: i64,
    /// Expiration time (timestamp)
    pub exp: i64,
}

impl Claims {
    fn new(user: &UserRecord) -> Self {
        let now = Utc::now();
        Self {
            sub: user.id.clone(),
            username: user.username.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(SESSION_HOURS)).timestamp(),
        }
    }
}

/// Issue a session token for an authenticated user
pub fn issue(user: &UserRecord) -> SiteResult<String> {
    let claims = Claims::new(user);
    encode(&Header::default(), &claims, &KEYS.encoding).map_err(|e| {
        warn!(error = %e, "Failed to sign session token");
        SiteError::internal("failed to sign session token")
    })
}

/// Verify and decode a session token
pub fn verify(token: &str) -> SiteResult<Claims> {
    decode::<Claims>(token, &KEYS.decoding, &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| {
            debug!(error = %e, "Session token rejected");
            SiteError::Unauthenticated
        })
}

/// Build the cookie carrying a freshly issued token
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .build()
}

/// Build the removal cookie used on logout
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .build()
}
