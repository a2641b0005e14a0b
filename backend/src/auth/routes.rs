//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle user login, registration, token refreshing, logout,
//! and the current-account lookup. Access control is enforced by the
//! policy-driven `authorize` middleware applied in `main`, not per route.

use crate::auth::handlers::*;
use axum::{
    Router,
    routing::{get, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/refresh", get(refresh_token))
        .route("/logout", post(logout))
        .route("/account", get(account))
}
