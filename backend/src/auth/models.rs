//! Data structures for authentication-related entities.
//!
//! This module defines the request/response models for the authentication
//! flow and the public identity projection attached to issued tokens.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::jwt::{PermissionInfo, RoleRef};

/// Login request payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Public identity projection returned by login/refresh and embedded in
/// token claims. Never carries the password hash or the raw refresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Option<RoleRef>,
    pub permissions: Vec<PermissionInfo>,
}

/// Login/refresh response body
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: AuthUser,
}

/// Response for the account endpoint
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub user: AuthUser,
}

/// A freshly issued session: the response body plus the refresh token and
/// cookie lifetime the handler turns into an http-only cookie. The raw
/// refresh token never appears in the response body itself.
#[derive(Debug)]
pub struct IssuedSession {
    pub response: LoginResponse,
    pub refresh_token: String,
    pub max_age_ms: u64,
}
