//! End-to-end account flow tests
//!
//! Drives the full router through tower's `oneshot`, the way a browser
//! would: form posts in, redirects and cookies out.

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use pitchside_web::{create_app, AppState, WebConfig};
use tower::ServiceExt;

async fn test_app() -> Router {
    let state = AppState::new(WebConfig::default()).await.unwrap();
    create_app(state)
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

/// Pull the `session=...` pair out of the Set-Cookie headers, skipping
/// removal cookies with an empty value.
fn session_cookie<B>(response: &Response<B>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(|value| value.split(';').next().unwrap_or_default())
        .find(|pair| pair.starts_with("session=") && *pair != "session=")
        .map(|pair| pair.to_string())
}

fn location<B>(response: &Response<B>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

#[tokio::test]
async fn registration_logs_the_user_in() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(form_post("/register", "username=alice&password=pw1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");

    let cookie = session_cookie(&response).expect("registration should set a session cookie");

    let response = app
        .oneshot(get_with_cookie("/dashboard", &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn duplicate_registration_bounces_back_to_the_form() {
    let app = test_app().await;

    app.clone()
        .oneshot(form_post("/register", "username=alice&password=pw1"))
        .await
        .unwrap();

    let response = app
        .oneshot(form_post("/register", "username=alice&password=other"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/register");
    assert!(session_cookie(&response).is_none());
}

#[tokio::test]
async fn login_round_trip() {
    let app = test_app().await;

    app.clone()
        .oneshot(form_post("/register", "username=bob&password=secret"))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(form_post("/login", "username=bob&password=secret"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");

    let cookie = session_cookie(&response).expect("login should set a session cookie");

    let response = app
        .oneshot(get_with_cookie("/dashboard", &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn bad_password_and_unknown_user_are_indistinguishable() {
    let app = test_app().await;

    app.clone()
        .oneshot(form_post("/register", "username=bob&password=secret"))
        .await
        .unwrap();

    let wrong_password = app
        .clone()
        .oneshot(form_post("/login", "username=bob&password=nope"))
        .await
        .unwrap();

    let unknown_user = app
        .oneshot(form_post("/login", "username=nobody&password=nope"))
        .await
        .unwrap();

    for response in [&wrong_password, &unknown_user] {
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(response), "/login");
        assert!(session_cookie(response).is_none());
    }
}

#[tokio::test]
async fn dashboard_requires_a_session() {
    let app = test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/dashboard").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn logout_clears_the_session_and_is_idempotent() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(form_post("/register", "username=carol&password=pw"))
        .await
        .unwrap();
    let cookie = session_cookie(&response).unwrap();

    let response = app
        .clone()
        .oneshot(get_with_cookie("/logout", &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    // The session cookie comes back emptied.
    assert!(session_cookie(&response).is_none());

    // A browser that dropped the cookie is locked out again.
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/dashboard").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

    // Logging out with no session at all still lands home cleanly.
    let response = app
        .oneshot(Request::builder().uri("/logout").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn empty_credentials_are_rejected() {
    let app = test_app().await;

    let response = app
        .oneshot(form_post("/register", "username=&password="))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/register");
    assert!(session_cookie(&response).is_none());
}
