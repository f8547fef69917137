//! Route definitions for the Pitchside web server

use crate::{auth, handlers, AppState};
use axum::{
    routing::{get, post},
    Router,
};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health_check))
}

/// Create site page and form routes
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::home))
        .route("/about", get(handlers::about))
        // Feeds
        .route("/news", get(handlers::news))
        .route("/scores", get(handlers::scores))
        // Contact form
        .route("/contact", get(handlers::contact_page))
        .route("/contact", post(handlers::submit_contact))
        // Account management
        .route("/register", get(handlers::register_page))
        .route("/register", post(auth::handlers::register_user))
        .route("/login", get(handlers::login_page))
        .route("/login", post(auth::handlers::login_user))
        .route("/logout", get(auth::handlers::logout_user))
        // Members only
        .route("/dashboard", get(auth::handlers::dashboard))
}
