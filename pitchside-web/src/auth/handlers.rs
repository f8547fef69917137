//! Handlers for registration, login, logout and the member dashboard
//!
//! Mutating endpoints take form-encoded input and answer with a redirect
//! plus a flash cookie; rejected credentials go back to the form, never to
//! an error page.

use super::{
    session,
    users::{LoginRequest, RegisterRequest},
    SessionUser,
};
use crate::{handlers::flash::flash, AppState};
use axum::{
    extract::{Form, State},
    response::{Json, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use pitchside_core::SiteError;
use serde_json::{json, Value};
use tracing::info;

/// User registration endpoint
///
/// Creates the account, logs the user in and notifies the site admin.
pub async fn register_user(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(request): Form<RegisterRequest>,
) -> (CookieJar, Redirect) {
    info!(username = %request.username, "User registration attempt");

    match state.auth.register(request).await {
        Ok((record, token)) => {
            // Best-effort admin notification; never blocks registration.
            state
                .mailer
                .send_registration_notification(&record.username)
                .await;

            let jar = jar
                .add(session::session_cookie(token))
                .add(flash("success", "Registration successful! You are now logged in."));
            (jar, Redirect::to("/dashboard"))
        }
        Err(SiteError::DuplicateUsername { username }) => {
            info!(username = %username, "Registration rejected: duplicate username");
            let jar = jar.add(flash("danger", "Username already exists. Please choose another."));
            (jar, Redirect::to("/register"))
        }
        Err(e) => {
            e.log();
            let jar = jar.add(flash("danger", "Registration failed. Try again."));
            (jar, Redirect::to("/register"))
        }
    }
}

/// User login endpoint
pub async fn login_user(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(request): Form<LoginRequest>,
) -> (CookieJar, Redirect) {
    info!(username = %request.username, "User login attempt");

    match state.auth.authenticate(request).await {
        Ok((record, token)) => {
            info!(username = %record.username, "User logged in");
            let jar = jar
                .add(session::session_cookie(token))
                .add(flash("success", "Logged in successfully."));
            (jar, Redirect::to("/dashboard"))
        }
        Err(e) => {
            // InvalidCredentials and storage trouble both land here; the
            // form only ever learns that the login did not work.
            e.log();
            let jar = jar.add(flash("danger", "Invalid username or password."));
            (jar, Redirect::to("/login"))
        }
    }
}

/// Logout endpoint
///
/// Clears the session cookie. Idempotent: logging out twice, or with no
/// session at all, is still a clean redirect home.
pub async fn logout_user(jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar
        .remove(session::removal_cookie())
        .add(flash("info", "You have been logged out."));
    (jar, Redirect::to("/"))
}

/// Member dashboard, guarded by [`SessionUser`]
pub async fn dashboard(user: SessionUser) -> Json<Value> {
    Json(json!({
        "page": "dashboard",
        "user_id": user.id,
        "username": user.username,
    }))
}
