//! Placeholder page handlers
//!
//! HTML rendering is owned by a separate templating layer; these endpoints
//! exist as stable redirect targets and return the minimal page payload.

use axum::response::Json;
use serde_json::{json, Value};

pub async fn home() -> Json<Value> {
    Json(json!({ "page": "home" }))
}

pub async fn login_page() -> Json<Value> {
    Json(json!({ "page": "login" }))
}

pub async fn register_page() -> Json<Value> {
    Json(json!({ "page": "register" }))
}

pub async fn about() -> Json<Value> {
    Json(json!({ "page": "about" }))
}

pub async fn contact_page() -> Json<Value> {
    Json(json!({ "page": "contact" }))
}
