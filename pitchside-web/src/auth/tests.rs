//! Tests for session extraction

use super::*;
use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{HeaderMap, HeaderValue, Method, Request},
};
use pitchside_core::UserRecord;

/// Build request parts carrying the given headers
fn parts_with_headers(headers: HeaderMap) -> axum::http::request::Parts {
    let mut request = Request::builder()
        .method(Method::GET)
        .uri("/dashboard")
        .body(Body::empty())
        .unwrap();

    *request.headers_mut() = headers;

    let (parts, _) = request.into_parts();
    parts
}

fn headers_with_session_cookie(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let value = format!("{}={}", session::SESSION_COOKIE, token);
    headers.insert("cookie", HeaderValue::from_str(&value).unwrap());
    headers
}

fn headers_with_bearer_token(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let value = format!("Bearer {token}");
    headers.insert("authorization", HeaderValue::from_str(&value).unwrap());
    headers
}

fn issued_token_for(username: &str) -> (UserRecord, String) {
    let record = UserRecord::new(username.to_string(), "hash".to_string());
    let token = session::issue(&record).unwrap();
    (record, token)
}

#[tokio::test]
async fn session_cookie_yields_the_user() {
    let (record, token) = issued_token_for("alice");
    let mut parts = parts_with_headers(headers_with_session_cookie(&token));

    let user = SessionUser::from_request_parts(&mut parts, &()).await.unwrap();

    assert_eq!(user.id, record.id);
    assert_eq!(user.username, "alice");
}

#[tokio::test]
async fn bearer_header_is_accepted_too() {
    let (record, token) = issued_token_for("bob");
    let mut parts = parts_with_headers(headers_with_bearer_token(&token));

    let user = SessionUser::from_request_parts(&mut parts, &()).await.unwrap();

    assert_eq!(user.id, record.id);
}

#[tokio::test]
async fn no_token_is_rejected() {
    let mut parts = parts_with_headers(HeaderMap::new());

    let result = SessionUser::from_request_parts(&mut parts, &()).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn malformed_cookie_is_rejected() {
    let mut parts = parts_with_headers(headers_with_session_cookie("garbage"));

    let result = SessionUser::from_request_parts(&mut parts, &()).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn rejection_redirects_to_login() {
    use axum::response::IntoResponse;

    let response = AuthRedirect.into_response();

    assert_eq!(
        response.status(),
        axum::http::StatusCode::TEMPORARY_REDIRECT
    );
    assert_eq!(response.headers().get("location").unwrap(), "/login");
}
