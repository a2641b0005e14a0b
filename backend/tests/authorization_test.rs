//! HTTP-level tests for the route policy table and authorization middleware.
//!
//! Covers public routes, the authenticated default for unlisted routes,
//! permission-gated routes, and the ADMIN bypass.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use backend::app;
use backend::database::models::{CreatePermission, CreateUser};
use backend::repositories::permission_repository::PermissionRepository;
use backend::repositories::role_repository::RoleRepository;
use backend::repositories::user_repository::UserRepository;
use backend::utils::password::hash_password;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use std::sync::Once;
use tower::util::ServiceExt;
use uuid::Uuid;

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

async fn test_app() -> (Router, SqlitePool) {
    init_env();

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!().run(&pool).await.unwrap();

    (app(pool.clone()), pool)
}

async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>) -> Response {
    let mut request = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    app.clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn create_user_with_role(pool: &SqlitePool, email: &str, role_name: &str) {
    let role = RoleRepository::new(pool)
        .get_role_by_name(role_name)
        .await
        .unwrap()
        .unwrap();

    UserRepository::new(pool)
        .create_user(CreateUser {
            id: Uuid::now_v7().to_string(),
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: hash_password("pw1").unwrap(),
            age: 30,
            gender: "female".to_string(),
            address: "Da Nang".to_string(),
            role_id: Some(role.id),
            created_by: None,
        })
        .await
        .unwrap();
}

async fn login_token(app: &Router, email: &str) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::json!({ "username": email, "password": "pw1" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    body["data"]["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_public_routes_need_no_token() {
    let (app, _pool) = test_app().await;

    assert_eq!(send(&app, "GET", "/", None).await.status(), StatusCode::OK);
    assert_eq!(
        send(&app, "GET", "/api/jobs", None).await.status(),
        StatusCode::OK
    );
    assert_eq!(
        send(&app, "GET", "/api/companies", None).await.status(),
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_missing_or_invalid_token_is_unauthorized() {
    let (app, _pool) = test_app().await;

    assert_eq!(
        send(&app, "GET", "/auth/account", None).await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        send(&app, "GET", "/auth/account", Some("aaa.bbb.ccc"))
            .await
            .status(),
        StatusCode::UNAUTHORIZED
    );

    // POST routes behind the gate are equally closed.
    assert_eq!(
        send(&app, "POST", "/api/companies", None).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn test_unlisted_routes_default_to_authenticated() {
    let (app, pool) = test_app().await;
    create_user_with_role(&pool, "user@x.com", "USER").await;

    // No policy entry for PUT: the middleware still demands a token.
    assert_eq!(
        send(&app, "PUT", "/api/users/42", None).await.status(),
        StatusCode::UNAUTHORIZED
    );

    // With a token the request reaches the router, which has no PUT route.
    let token = login_token(&app, "user@x.com").await;
    assert_eq!(
        send(&app, "PUT", "/api/users/42", Some(&token))
            .await
            .status(),
        StatusCode::METHOD_NOT_ALLOWED
    );
}

#[tokio::test]
async fn test_permission_gate_follows_the_role_grants() {
    let (app, pool) = test_app().await;
    create_user_with_role(&pool, "user@x.com", "USER").await;

    // USER starts with no grants.
    let token = login_token(&app, "user@x.com").await;
    assert_eq!(
        send(&app, "GET", "/api/users", Some(&token)).await.status(),
        StatusCode::FORBIDDEN
    );

    // Grant the route's (path, method) pair to the USER role.
    let role = RoleRepository::new(&pool)
        .get_role_by_name("USER")
        .await
        .unwrap()
        .unwrap();
    let permission = PermissionRepository::new(&pool)
        .create_permission(
            &Uuid::now_v7().to_string(),
            &CreatePermission {
                name: "List users".to_string(),
                api_path: "/api/users".to_string(),
                method: "GET".to_string(),
                module: "USERS".to_string(),
            },
            "tester",
        )
        .await
        .unwrap();
    RoleRepository::new(&pool)
        .set_role_permissions(&role.id, &[permission.id])
        .await
        .unwrap();

    // The old token still carries the empty snapshot.
    assert_eq!(
        send(&app, "GET", "/api/users", Some(&token)).await.status(),
        StatusCode::FORBIDDEN
    );

    // A fresh login picks up the grant.
    let token = login_token(&app, "user@x.com").await;
    assert_eq!(
        send(&app, "GET", "/api/users", Some(&token)).await.status(),
        StatusCode::OK
    );

    // The grant is for GET only.
    assert_eq!(
        send(&app, "DELETE", "/api/users/42", Some(&token))
            .await
            .status(),
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn test_admin_bypasses_permission_checks() {
    let (app, pool) = test_app().await;
    create_user_with_role(&pool, "admin@x.com", "ADMIN").await;

    let token = login_token(&app, "admin@x.com").await;

    // No explicit grants, yet every permission-gated route opens.
    assert_eq!(
        send(&app, "GET", "/api/users", Some(&token)).await.status(),
        StatusCode::OK
    );
    assert_eq!(
        send(&app, "GET", "/api/permissions", Some(&token))
            .await
            .status(),
        StatusCode::OK
    );
}
