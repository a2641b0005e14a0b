//! HTTP-level tests for the authentication flow.
//!
//! Exercises registration, login, refresh-token rotation, and logout through
//! the full router with the authorization middleware in place, asserting on
//! status codes, response bodies, and the http-only refresh cookie.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use backend::app;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Once;
use tower::util::ServiceExt;

fn init_env() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // SAFETY: runs to completion before any test sends a request, so no
        // reader observes a partially written environment.
        unsafe {
            std::env::set_var("DATABASE_URL", "sqlite::memory:");
            std::env::set_var("JWT_SECRET", "access-secret-for-tests");
            std::env::set_var("JWT_REFRESH_TOKEN_SECRET", "refresh-secret-for-tests");
            std::env::set_var("JWT_REFRESH_EXPIRE", "7d");
        }
    });
}

async fn test_app() -> Router {
    init_env();

    // A single connection keeps every query on the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!().run(&pool).await.unwrap();

    app(pool)
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    cookie: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, format!("refresh_token={cookie}"));
    }

    let body = match body {
        Some(json) => Body::from(serde_json::to_vec(&json).unwrap()),
        None => Body::empty(),
    };

    app.clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn set_cookie_header(response: &Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should set the refresh cookie")
        .to_str()
        .unwrap()
        .to_string()
}

fn refresh_cookie_value(response: &Response) -> String {
    set_cookie_header(response)
        .split(';')
        .next()
        .unwrap()
        .strip_prefix("refresh_token=")
        .expect("cookie should be named refresh_token")
        .to_string()
}

fn register_body(email: &str) -> serde_json::Value {
    serde_json::json!({
        "name": "Binh Nguyen",
        "email": email,
        "password": "pw1",
        "age": 28,
        "gender": "male",
        "address": "Ha Noi"
    })
}

fn login_body(email: &str, password: &str) -> serde_json::Value {
    serde_json::json!({ "username": email, "password": password })
}

async fn register(app: &Router, email: &str) -> Response {
    send_json(app, "POST", "/auth/register", None, None, Some(register_body(email))).await
}

async fn login(app: &Router, email: &str, password: &str) -> Response {
    send_json(
        app,
        "POST",
        "/auth/login",
        None,
        None,
        Some(login_body(email, password)),
    )
    .await
}

#[tokio::test]
async fn test_register_returns_id_and_rejects_duplicates() {
    let app = test_app().await;

    let response = register(&app, "a@x.com").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["data"]["_id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(body["data"]["createdAt"].as_str().is_some());
    // The password never appears in the response.
    assert!(body["data"].get("password").is_none());

    let duplicate = register(&app, "a@x.com").await;
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);

    // The first registration still logs in fine.
    let response = login(&app, "a@x.com", "pw1").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials_uniformly() {
    let app = test_app().await;
    register(&app, "a@x.com").await;

    let wrong_password = login(&app, "a@x.com", "wrong").await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    let unknown_email = login(&app, "nobody@x.com", "pw1").await;
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_sets_http_only_refresh_cookie() {
    let app = test_app().await;
    register(&app, "a@x.com").await;

    let response = login(&app, "a@x.com", "pw1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = set_cookie_header(&response);
    assert!(cookie.starts_with("refresh_token="));
    assert!(cookie.contains("HttpOnly"));
    // 7d refresh expiry as cookie max-age, in seconds.
    assert!(cookie.contains("Max-Age=604800"));

    let body = body_json(response).await;
    let user = &body["data"]["user"];
    assert!(body["data"]["access_token"].as_str().is_some());
    assert_eq!(user["email"], "a@x.com");
    assert_eq!(user["role"]["name"], "USER");
    assert!(user["permissions"].as_array().is_some());
    // Neither the hash nor the raw refresh token leak into the body.
    assert!(user.get("password_hash").is_none());
    assert!(user.get("refresh_token").is_none());
}

#[tokio::test]
async fn test_refresh_rotates_and_invalidates_prior_token() {
    let app = test_app().await;
    register(&app, "a@x.com").await;

    let response = login(&app, "a@x.com", "pw1").await;
    let first_cookie = refresh_cookie_value(&response);
    let first_access = body_json(response).await["data"]["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    // Exchanging the fresh token succeeds and issues a new pair.
    let response = send_json(&app, "GET", "/auth/refresh", None, Some(&first_cookie), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let second_cookie = refresh_cookie_value(&response);
    let second_access = body_json(response).await["data"]["access_token"]
        .as_str()
        .unwrap()
        .to_string();
    assert_ne!(second_cookie, first_cookie);
    assert_ne!(second_access, first_access);

    // Replaying the superseded cookie fails.
    let replay = send_json(&app, "GET", "/auth/refresh", None, Some(&first_cookie), None).await;
    assert_eq!(replay.status(), StatusCode::BAD_REQUEST);

    // The rotated cookie is the one that works now.
    let rotated = send_json(&app, "GET", "/auth/refresh", None, Some(&second_cookie), None).await;
    assert_eq!(rotated.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_rejects_missing_or_garbage_cookie() {
    let app = test_app().await;

    let missing = send_json(&app, "GET", "/auth/refresh", None, None, None).await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let garbage = send_json(&app, "GET", "/auth/refresh", None, Some("aaa.bbb.ccc"), None).await;
    assert_eq!(garbage.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_logout_ends_the_session() {
    let app = test_app().await;
    register(&app, "a@x.com").await;

    let response = login(&app, "a@x.com", "pw1").await;
    let cookie = refresh_cookie_value(&response);
    let access = body_json(response).await["data"]["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = send_json(&app, "POST", "/auth/logout", Some(&access), None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    // The cookie is cleared on the way out.
    assert!(set_cookie_header(&response).starts_with("refresh_token=;"));
    assert_eq!(body_json(response).await["data"], "ok");

    // The last valid refresh token is dead even though it has not expired.
    let replay = send_json(&app, "GET", "/auth/refresh", None, Some(&cookie), None).await;
    assert_eq!(replay.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_account_returns_the_token_identity() {
    let app = test_app().await;
    register(&app, "a@x.com").await;

    let response = login(&app, "a@x.com", "pw1").await;
    let access = body_json(response).await["data"]["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = send_json(&app, "GET", "/auth/account", Some(&access), None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["user"]["email"], "a@x.com");
    assert_eq!(body["data"]["user"]["role"]["name"], "USER");

    let anonymous = send_json(&app, "GET", "/auth/account", None, None, None).await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
}
