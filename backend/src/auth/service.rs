//! Core business logic for the authentication system.
//!
//! The orchestrator coordinates credential verification, permission
//! resolution, token issuance, and refresh-token rotation. The only durable
//! session state is the `refresh_token` column on the user row: it either
//! holds the most recently issued refresh token or is empty. Login and
//! refresh overwrite it (invalidating the prior token), logout clears it.

use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

use crate::api::common::{CreatedResponse, validation_errors_to_message};
use crate::auth::models::{AuthUser, IssuedSession, LoginResponse};
use crate::config::Config;
use crate::database::models::{CreateUser, RegisterUser, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::role_repository::RoleRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::jwt::{JwtUtils, RoleRef};
use crate::utils::password::{hash_password, verify_password};

/// Role assigned to self-registered users, resolved by name.
pub const DEFAULT_ROLE: &str = "USER";

/// Authentication service for handling registration, login, token rotation,
/// and logout
pub struct AuthService<'a> {
    pool: &'a SqlitePool,
    jwt: JwtUtils,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService with configuration from the environment
    pub fn new(pool: &'a SqlitePool) -> ServiceResult<Self> {
        let config = Config::from_env()
            .map_err(|e| ServiceError::internal_error(format!("Config error: {e}")))?;

        Ok(Self::with_config(pool, &config))
    }

    /// Create a new AuthService from an already-loaded configuration
    pub fn with_config(pool: &'a SqlitePool, config: &Config) -> Self {
        AuthService {
            pool,
            jwt: JwtUtils::from_config(config),
        }
    }

    /// Registers a new user with the default role.
    ///
    /// Fails when the email is already taken by a live account. A missing
    /// default role is tolerated: the account is created without a role and
    /// gains no permissions until one is assigned.
    pub async fn register(&self, payload: RegisterUser) -> ServiceResult<CreatedResponse> {
        if let Err(validation_errors) = payload.validate() {
            return Err(ServiceError::validation(validation_errors_to_message(
                validation_errors,
            )));
        }

        let users = UserRepository::new(self.pool);

        if users.email_exists(&payload.email).await? {
            return Err(ServiceError::duplicate_email(&payload.email));
        }

        let role = RoleRepository::new(self.pool)
            .get_role_by_name(DEFAULT_ROLE)
            .await?;

        let password_hash = hash_password(&payload.password)?;

        let user = users
            .create_user(CreateUser {
                id: Uuid::now_v7().to_string(),
                name: payload.name,
                email: payload.email,
                password_hash,
                age: payload.age,
                gender: payload.gender,
                address: payload.address,
                role_id: role.map(|r| r.id),
                created_by: None,
            })
            .await?;

        // The password hash never leaves the service layer.
        Ok(CreatedResponse {
            id: user.id,
            created_at: user.created_at,
        })
    }

    /// Checks credentials and returns the enriched identity on success.
    ///
    /// Returns `Ok(None)` for an unknown email as well as for a wrong
    /// password; callers cannot tell the two apart. Read-only.
    pub async fn validate_user(
        &self,
        username: &str,
        password: &str,
    ) -> ServiceResult<Option<AuthUser>> {
        let users = UserRepository::new(self.pool);

        let Some(user) = users.get_user_by_email(username).await? else {
            return Ok(None);
        };

        if !verify_password(password, &user.password_hash) {
            return Ok(None);
        }

        Ok(Some(self.enrich(&user).await?))
    }

    /// Issues an access/refresh token pair for an already-validated identity.
    ///
    /// Persisting the new refresh token overwrites any prior value; that
    /// overwrite is the rotation mechanism, so only the most recently issued
    /// refresh token can be exchanged.
    pub async fn login(&self, user: AuthUser) -> ServiceResult<IssuedSession> {
        let access_token = self.jwt.generate_access_token(&user)?;
        let refresh_token = self.jwt.generate_refresh_token(&user)?;

        UserRepository::new(self.pool)
            .update_refresh_token(&user.id, &refresh_token)
            .await?;

        Ok(IssuedSession {
            response: LoginResponse { access_token, user },
            refresh_token,
            max_age_ms: self.jwt.refresh_expiry_ms(),
        })
    }

    /// Exchanges a refresh token for a brand-new token pair.
    ///
    /// Every failure mode collapses into [`ServiceError::InvalidRefreshToken`]:
    /// clients never learn whether the token was expired, forged, malformed,
    /// or superseded by a newer login/refresh.
    pub async fn process_refresh(&self, refresh_token: &str) -> ServiceResult<IssuedSession> {
        match self.exchange_refresh_token(refresh_token).await {
            Ok(session) => Ok(session),
            Err(error) => {
                tracing::warn!("refresh token rejected: {error}");
                Err(ServiceError::InvalidRefreshToken)
            }
        }
    }

    /// Clears the stored refresh token, ending the user's session.
    ///
    /// Any previously issued refresh token becomes permanently invalid even
    /// if it has not yet expired.
    pub async fn logout(&self, user_id: &str) -> ServiceResult<()> {
        UserRepository::new(self.pool)
            .update_refresh_token(user_id, "")
            .await?;

        Ok(())
    }

    async fn exchange_refresh_token(&self, refresh_token: &str) -> ServiceResult<IssuedSession> {
        self.jwt.validate_refresh_token(refresh_token)?;

        // Exact match against the stored column: a token that still
        // verifies cryptographically but was superseded by a newer
        // login/refresh no longer matches and is rejected.
        let user = UserRepository::new(self.pool)
            .find_user_by_refresh_token(refresh_token)
            .await?
            .ok_or(ServiceError::InvalidRefreshToken)?;

        let user = self.enrich(&user).await?;
        self.login(user).await
    }

    /// Attaches the role reference and permission snapshot to a user row.
    ///
    /// A dangling or absent role id yields no role and an empty permission
    /// set rather than an error.
    async fn enrich(&self, user: &User) -> ServiceResult<AuthUser> {
        let (role, permissions) = match user.role_id.as_deref() {
            Some(role_id) => {
                let roles = RoleRepository::new(self.pool);

                let role = roles.get_role_by_id(role_id).await?.map(|r| RoleRef {
                    id: r.id,
                    name: r.name,
                });

                let permissions = roles
                    .get_permissions_by_role_id(role_id)
                    .await?
                    .into_iter()
                    .map(Into::into)
                    .collect();

                (role, permissions)
            }
            None => (None, Vec::new()),
        };

        Ok(AuthUser {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role,
            permissions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::CreatePermission;
    use crate::repositories::permission_repository::PermissionRepository;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        // A single connection keeps every query on the same in-memory
        // database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::migrate!().run(&pool).await.unwrap();
        pool
    }

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

    fn register_payload(email: &str) -> RegisterUser {
        RegisterUser {
            name: "Binh Nguyen".to_string(),
            email: email.to_string(),
            password: "pw1".to_string(),
            age: 28,
            gender: "male".to_string(),
            address: "Ha Noi".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let pool = test_pool().await;
        let service = AuthService::with_config(&pool, &test_config());

        let created = service.register(register_payload("a@x.com")).await.unwrap();
        assert!(!created.id.is_empty());

        let err = service
            .register(register_payload("a@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateEmail { .. }));

        // The first registration is unaffected.
        let user = service.validate_user("a@x.com", "pw1").await.unwrap();
        assert!(user.is_some());
    }

    #[tokio::test]
    async fn test_validate_user_does_not_distinguish_failure_causes() {
        let pool = test_pool().await;
        let service = AuthService::with_config(&pool, &test_config());

        service.register(register_payload("a@x.com")).await.unwrap();

        assert!(service.validate_user("a@x.com", "wrong").await.unwrap().is_none());
        assert!(service.validate_user("nobody@x.com", "pw1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_register_assigns_default_role() {
        let pool = test_pool().await;
        let service = AuthService::with_config(&pool, &test_config());

        service.register(register_payload("a@x.com")).await.unwrap();

        let user = service
            .validate_user("a@x.com", "pw1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.role.as_ref().unwrap().name, DEFAULT_ROLE);
        assert!(user.permissions.is_empty());
    }

    #[tokio::test]
    async fn test_login_persists_refresh_token() {
        let pool = test_pool().await;
        let service = AuthService::with_config(&pool, &test_config());

        service.register(register_payload("a@x.com")).await.unwrap();
        let user = service
            .validate_user("a@x.com", "pw1")
            .await
            .unwrap()
            .unwrap();

        let session = service.login(user).await.unwrap();
        assert!(!session.response.access_token.is_empty());
        assert_ne!(session.response.access_token, session.refresh_token);

        let stored = UserRepository::new(&pool)
            .get_user_by_email("a@x.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.refresh_token.as_deref(), Some(session.refresh_token.as_str()));
    }

    #[tokio::test]
    async fn test_refresh_rotates_and_invalidates_prior_token() {
        let pool = test_pool().await;
        let service = AuthService::with_config(&pool, &test_config());

        service.register(register_payload("a@x.com")).await.unwrap();
        let user = service
            .validate_user("a@x.com", "pw1")
            .await
            .unwrap()
            .unwrap();
        let first = service.login(user).await.unwrap();

        // The freshly issued refresh token exchanges exactly once.
        let second = service.process_refresh(&first.refresh_token).await.unwrap();
        assert_ne!(second.refresh_token, first.refresh_token);
        assert_ne!(second.response.access_token, first.response.access_token);

        // Replaying the superseded token fails.
        let err = service
            .process_refresh(&first.refresh_token)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRefreshToken));

        // The rotated token is the one that works now.
        assert!(service.process_refresh(&second.refresh_token).await.is_ok());
    }

    #[tokio::test]
    async fn test_logout_invalidates_last_refresh_token() {
        let pool = test_pool().await;
        let service = AuthService::with_config(&pool, &test_config());

        service.register(register_payload("a@x.com")).await.unwrap();
        let user = service
            .validate_user("a@x.com", "pw1")
            .await
            .unwrap()
            .unwrap();
        let session = service.login(user.clone()).await.unwrap();

        service.logout(&user.id).await.unwrap();

        let err = service
            .process_refresh(&session.refresh_token)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRefreshToken));
    }

    #[tokio::test]
    async fn test_refresh_rejects_garbage_tokens() {
        let pool = test_pool().await;
        let service = AuthService::with_config(&pool, &test_config());

        for token in ["", "not-a-jwt", "aaa.bbb.ccc"] {
            let err = service.process_refresh(token).await.unwrap_err();
            assert!(matches!(err, ServiceError::InvalidRefreshToken));
        }
    }

    #[tokio::test]
    async fn test_access_token_permissions_are_a_snapshot() {
        let pool = test_pool().await;
        let config = test_config();
        let service = AuthService::with_config(&pool, &config);
        let jwt = JwtUtils::from_config(&config);

        service.register(register_payload("a@x.com")).await.unwrap();

        // Grant the default role a permission before login.
        let roles = RoleRepository::new(&pool);
        let role = roles.get_role_by_name(DEFAULT_ROLE).await.unwrap().unwrap();
        let permission = PermissionRepository::new(&pool)
            .create_permission(
                "perm-1",
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
        roles
            .set_role_permissions(&role.id, &[permission.id.clone()])
            .await
            .unwrap();

        let user = service
            .validate_user("a@x.com", "pw1")
            .await
            .unwrap()
            .unwrap();
        let session = service.login(user).await.unwrap();

        // Revoke the grant after the token was signed.
        roles.set_role_permissions(&role.id, &[]).await.unwrap();

        let claims = jwt
            .validate_access_token(&session.response.access_token)
            .unwrap();
        assert!(claims.has_permission("/api/users", "GET"));

        // A fresh login picks up the revocation.
        let user = service
            .validate_user("a@x.com", "pw1")
            .await
            .unwrap()
            .unwrap();
        assert!(user.permissions.is_empty());
    }

    #[tokio::test]
    async fn test_full_session_lifecycle() {
        let pool = test_pool().await;
        let service = AuthService::with_config(&pool, &test_config());

        // Register succeeds and returns an id.
        let created = service.register(register_payload("a@x.com")).await.unwrap();
        assert!(!created.id.is_empty());

        // Re-registering the same email fails.
        assert!(service.register(register_payload("a@x.com")).await.is_err());

        // Credential check returns the enriched identity.
        let user = service
            .validate_user("a@x.com", "pw1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.email, "a@x.com");

        // Login, then rotate through refresh.
        let session = service.login(user.clone()).await.unwrap();
        let rotated = service.process_refresh(&session.refresh_token).await.unwrap();
        assert_ne!(rotated.refresh_token, session.refresh_token);

        // Logout kills the rotated token too.
        service.logout(&user.id).await.unwrap();
        assert!(service.process_refresh(&rotated.refresh_token).await.is_err());
    }
}
