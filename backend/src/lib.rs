//! Library crate for the job portal backend.
//!
//! Exposes the application modules and the router builder so the binary and
//! the integration tests share one wiring: all entity routes nested behind
//! the policy-driven authorization middleware with the shared connection
//! pool attached as an extension.

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::{Extension, Router, middleware, response::Json, routing::get};
use sqlx::SqlitePool;

use crate::api::common::ApiResponse;
use crate::auth::policy::PolicyTable;

/// Builds the application router over the given connection pool.
pub fn app(pool: SqlitePool) -> Router {
    let policy = Arc::new(PolicyTable::new());

    Router::new()
        .route("/", get(root_handler))
        .nest("/auth", auth::routes::auth_router())
        .nest("/api/users", api::user::routes::user_router())
        .nest("/api/companies", api::company::routes::company_router())
        .nest("/api/jobs", api::job::routes::job_router())
        .nest("/api/roles", api::role::routes::role_router())
        .nest(
            "/api/permissions",
            api::permission::routes::permission_router(),
        )
        .nest("/api/resumes", api::resume::routes::resume_router())
        .nest(
            "/api/subscribers",
            api::subscriber::routes::subscriber_router(),
        )
        .layer(middleware::from_fn(auth::middleware::authorize))
        .layer(Extension(policy))
        .layer(Extension(pool))
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "Job Portal Backend",
            "version": "0.1.0"
        }),
        "Welcome to the Job Portal API",
    ))
}
