//! Authentication and session handling
//!
//! Identity is carried in a server-signed token held by the client; the
//! server keeps no session table. Protected pages pull a [`SessionUser`]
//! out of the request and redirect to the login page when it is absent.

pub mod handlers;
pub mod session;
pub mod users;

#[cfg(test)]
mod tests;

use crate::handlers::flash;
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The identity certified by a valid session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    /// Opaque user id referencing the stored record
    pub id: String,
    /// Denormalized copy of the username
    pub username: String,
}

/// Rejection for protected pages reached without a session: flash a note
/// and send the client to the login page.
#[derive(Debug)]
pub struct AuthRedirect;

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        let jar = CookieJar::new().add(flash::flash("warning", "Please log in to view this page."));
        (jar, Redirect::temporary("/login")).into_response()
    }
}

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // The browsing session rides in a cookie; a Bearer header is
        // accepted as well for non-browser clients.
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| AuthRedirect)?;

        let token = jar
            .get(session::SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .or_else(|| bearer_token(parts));

        let Some(token) = token else {
            debug!("No session token on request");
            return Err(AuthRedirect);
        };

        let claims = session::verify(&token).map_err(|_| AuthRedirect)?;

        Ok(SessionUser {
            id: claims.sub,
            username: claims.username,
        })
    }
}

/// Extract a token from an `Authorization: Bearer` header, if present
fn bearer_token(parts: &Parts) -> Option<String> {
    let value = parts.headers.get("authorization")?.to_str().ok()?;
    value.strip_prefix("Bearer ").map(|t| t.to_string())
}
