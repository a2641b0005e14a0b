//! JWT token utilities for authentication and authorization.
//!
//! Provides token creation, validation, and claims management. Access and
//! refresh tokens are signed with independent secrets and lifetimes; a token
//! signed for one purpose never validates for the other.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::models::AuthUser;
use crate::config::Config;
use crate::database::models::Permission;
use crate::errors::ServiceError;

/// Subject tag carried by access tokens.
pub const LOGIN_SUBJECT: &str = "token login";
/// Subject tag carried by refresh tokens.
pub const REFRESH_SUBJECT: &str = "token refresh";
/// Issuer tag carried by every token.
pub const TOKEN_ISSUER: &str = "from server";

/// Role name that bypasses per-route permission checks.
pub const ADMIN_ROLE: &str = "ADMIN";

/// Role reference embedded in token claims and identity projections.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RoleRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// Permission projection embedded in access-token claims.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PermissionInfo {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "apiPath")]
    pub api_path: String,
    pub method: String,
    pub module: String,
}

impl From<Permission> for PermissionInfo {
    fn from(permission: Permission) -> Self {
        PermissionInfo {
            id: permission.id,
            name: permission.name,
            api_path: permission.api_path,
            method: permission.method,
            module: permission.module,
        }
    }
}

/// JWT claims shared by access and refresh tokens.
///
/// Refresh tokens carry the same shape with an empty permission set; the
/// permission snapshot only travels in access tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Token purpose tag: [`LOGIN_SUBJECT`] or [`REFRESH_SUBJECT`]
    pub sub: String,
    /// Issuer tag
    pub iss: String,
    /// Unique token id; keeps back-to-back issuances distinct
    pub jti: String,
    /// User ID
    #[serde(rename = "_id")]
    pub user_id: String,
    /// Display name
    pub name: String,
    /// Email
    pub email: String,
    /// Role reference, absent when the user has no role assigned
    pub role: Option<RoleRef>,
    /// Permission snapshot taken at issuance time
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<PermissionInfo>,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn is_admin(&self) -> bool {
        self.role.as_ref().is_some_and(|r| r.name == ADMIN_ROLE)
    }

    /// Checks the embedded permission snapshot for an exact
    /// (api path pattern, method) grant.
    pub fn has_permission(&self, api_path: &str, method: &str) -> bool {
        self.permissions
            .iter()
            .any(|p| p.api_path == api_path && p.method == method)
    }

    /// Public identity projection of these claims.
    pub fn auth_user(&self) -> AuthUser {
        AuthUser {
            id: self.user_id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
            permissions: self.permissions.clone(),
        }
    }
}

/// JWT token utility for creating and validating tokens
pub struct JwtUtils {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    validation: Validation,
    access_expiry_seconds: u64,
    refresh_expiry_ms: u64,
}

impl JwtUtils {
    /// Create a new JwtUtils instance with secrets from the environment
    pub fn new() -> Result<Self, ServiceError> {
        let config = Config::from_env()
            .map_err(|e| ServiceError::internal_error(format!("Config error: {e}")))?;

        Ok(Self::from_config(&config))
    }

    /// Create a JwtUtils instance from an already-loaded configuration
    pub fn from_config(config: &Config) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        JwtUtils {
            access_encoding: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.jwt_refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.jwt_refresh_secret.as_bytes()),
            validation,
            access_expiry_seconds: config.jwt_expires_in_seconds,
            refresh_expiry_ms: config.jwt_refresh_expire_ms,
        }
    }

    /// Refresh-token lifetime in milliseconds; also used as cookie max-age.
    pub fn refresh_expiry_ms(&self) -> u64 {
        self.refresh_expiry_ms
    }

    /// Generate an access token carrying the user's permission snapshot
    pub fn generate_access_token(&self, user: &AuthUser) -> Result<String, ServiceError> {
        let claims = self.build_claims(
            user,
            LOGIN_SUBJECT,
            user.permissions.clone(),
            self.access_expiry_seconds as i64,
        );

        encode(&Header::default(), &claims, &self.access_encoding)
            .map_err(|e| ServiceError::internal_error(format!("Token generation failed: {e}")))
    }

    /// Generate a refresh token; same claim shape, no permission snapshot
    pub fn generate_refresh_token(&self, user: &AuthUser) -> Result<String, ServiceError> {
        let claims = self.build_claims(
            user,
            REFRESH_SUBJECT,
            Vec::new(),
            (self.refresh_expiry_ms / 1_000) as i64,
        );

        encode(&Header::default(), &claims, &self.refresh_encoding).map_err(|e| {
            ServiceError::internal_error(format!("Refresh token generation failed: {e}"))
        })
    }

    /// Validate and decode an access token
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, ServiceError> {
        decode::<Claims>(token, &self.access_decoding, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| ServiceError::validation(format!("Token validation failed: {e}")))
    }

    /// Validate and decode a refresh token
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, ServiceError> {
        decode::<Claims>(token, &self.refresh_decoding, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| ServiceError::validation(format!("Refresh token validation failed: {e}")))
    }

    fn build_claims(
        &self,
        user: &AuthUser,
        subject: &str,
        permissions: Vec<PermissionInfo>,
        expiry_seconds: i64,
    ) -> Claims {
        let now = Utc::now();
        let exp = now + Duration::seconds(expiry_seconds);

        Claims {
            sub: subject.to_string(),
            iss: TOKEN_ISSUER.to_string(),
            jti: Uuid::now_v7().to_string(),
            user_id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            permissions,
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_seconds: 3,
            jwt_secret: "access-secret-for-tests".to_string(),
            jwt_expires_in_seconds: 3_600,
            jwt_refresh_secret: "refresh-secret-for-tests".to_string(),
            jwt_refresh_expire_ms: 7 * 24 * 60 * 60 * 1_000,
            server_port: 0,
        }
    }

    fn test_user() -> AuthUser {
        AuthUser {
            id: "user-1".to_string(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            role: Some(RoleRef {
                id: "role-1".to_string(),
                name: "USER".to_string(),
            }),
            permissions: vec![PermissionInfo {
                id: "perm-1".to_string(),
                name: "List jobs".to_string(),
                api_path: "/api/jobs".to_string(),
                method: "GET".to_string(),
                module: "JOBS".to_string(),
            }],
        }
    }

    #[test]
    fn test_access_token_round_trip() {
        let jwt = JwtUtils::from_config(&test_config());
        let token = jwt.generate_access_token(&test_user()).unwrap();

        let claims = jwt.validate_access_token(&token).unwrap();
        assert_eq!(claims.sub, LOGIN_SUBJECT);
        assert_eq!(claims.iss, TOKEN_ISSUER);
        assert_eq!(claims.user_id, "user-1");
        assert_eq!(claims.permissions.len(), 1);
        assert!(claims.has_permission("/api/jobs", "GET"));
        assert!(!claims.has_permission("/api/jobs", "POST"));
    }

    #[test]
    fn test_refresh_token_has_no_permission_snapshot() {
        let jwt = JwtUtils::from_config(&test_config());
        let token = jwt.generate_refresh_token(&test_user()).unwrap();

        let claims = jwt.validate_refresh_token(&token).unwrap();
        assert_eq!(claims.sub, REFRESH_SUBJECT);
        assert!(claims.permissions.is_empty());
    }

    #[test]
    fn test_secrets_are_not_interchangeable() {
        let jwt = JwtUtils::from_config(&test_config());
        let access = jwt.generate_access_token(&test_user()).unwrap();
        let refresh = jwt.generate_refresh_token(&test_user()).unwrap();

        assert!(jwt.validate_refresh_token(&access).is_err());
        assert!(jwt.validate_access_token(&refresh).is_err());
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        let jwt = JwtUtils::from_config(&test_config());

        assert!(jwt.validate_access_token("not-a-token").is_err());
        assert!(jwt.validate_refresh_token("").is_err());
    }

    #[test]
    fn test_back_to_back_issuance_yields_distinct_tokens() {
        let jwt = JwtUtils::from_config(&test_config());
        let user = test_user();

        let first = jwt.generate_refresh_token(&user).unwrap();
        let second = jwt.generate_refresh_token(&user).unwrap();
        assert_ne!(first, second);
    }
}
