//! Middleware for protecting authenticated routes and handling authorization.
//!
//! A single `authorize` middleware consults the route policy table: public
//! routes pass untouched, every other route requires a valid Bearer access
//! token, and permission-gated routes additionally require a matching grant
//! in the token's permission snapshot. On success the decoded claims are
//! inserted into request extensions for handlers to consume.

use std::sync::Arc;

use axum::{
    extract::{Extension, Request},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

use crate::auth::policy::{Access, PolicyTable};
use crate::utils::jwt::JwtUtils;

/// Policy-driven authentication and authorization middleware
pub async fn authorize(
    Extension(policy): Extension<Arc<PolicyTable>>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let method = request.method().as_str().to_owned();
    let path = request.uri().path().to_owned();

    let entry = policy.lookup(&method, &path);

    if entry.is_some_and(|e| e.access == Access::Public) {
        return Ok(next.run(request).await);
    }

    // Extract and validate the Bearer access token
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let jwt_utils = JwtUtils::new().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let claims = jwt_utils
        .validate_access_token(token)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    // Permission-gated routes check the token's permission snapshot
    // against the route's own (pattern, method) pair. ADMIN bypasses.
    if let Some(entry) = entry {
        if entry.access == Access::Permission
            && !claims.is_admin()
            && !claims.has_permission(entry.path, entry.method)
        {
            return Err(StatusCode::FORBIDDEN);
        }
    }

    // Hand the resolved identity to handlers through request extensions
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
