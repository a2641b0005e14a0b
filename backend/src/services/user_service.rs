//! User business logic service.
//!
//! Handles admin-side user management. Self-service registration lives in
//! the auth service; this service covers the management surface.

use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

use crate::api::common::{CreatedResponse, PaginationFilter, validation_errors_to_message};
use crate::database::models::{CreateNewUser, CreateUser, UpdateUser, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::role_repository::RoleRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::jwt::Claims;
use crate::utils::password::hash_password;

pub struct UserService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new user on behalf of an administrator.
    ///
    /// Unlike registration the caller picks the role; the same
    /// duplicate-email rule applies.
    pub async fn create_user(
        &self,
        payload: CreateNewUser,
        actor: &Claims,
    ) -> ServiceResult<CreatedResponse> {
        if let Err(validation_errors) = payload.validate() {
            return Err(ServiceError::validation(validation_errors_to_message(
                validation_errors,
            )));
        }

        let repo = UserRepository::new(self.pool);

        if repo.email_exists(&payload.email).await? {
            return Err(ServiceError::duplicate_email(&payload.email));
        }

        // An explicitly chosen role must exist.
        if let Some(role_id) = payload.role_id.as_deref() {
            if RoleRepository::new(self.pool)
                .get_role_by_id(role_id)
                .await?
                .is_none()
            {
                return Err(ServiceError::not_found("Role", role_id));
            }
        }

        let password_hash = hash_password(&payload.password)?;

        let user = repo
            .create_user(CreateUser {
                id: Uuid::now_v7().to_string(),
                name: payload.name,
                email: payload.email,
                password_hash,
                age: payload.age,
                gender: payload.gender,
                address: payload.address,
                role_id: payload.role_id,
                created_by: Some(actor.user_id().to_string()),
            })
            .await?;

        Ok(CreatedResponse {
            id: user.id,
            created_at: user.created_at,
        })
    }

    /// Retrieves a page of users together with the total live count.
    pub async fn get_users(&self, pagination: &PaginationFilter) -> ServiceResult<(Vec<User>, u64)> {
        let repo = UserRepository::new(self.pool);

        let users = repo.get_users(pagination).await?;
        let total = repo.get_users_count().await?;

        Ok((users, total))
    }

    /// Retrieves a user by ID with existence verification.
    pub async fn get_user_required(&self, id: &str) -> ServiceResult<User> {
        let user = UserRepository::new(self.pool)
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))?;

        Ok(user)
    }

    pub async fn update_user(
        &self,
        id: &str,
        payload: UpdateUser,
        actor: &Claims,
    ) -> ServiceResult<User> {
        if let Err(validation_errors) = payload.validate() {
            return Err(ServiceError::validation(validation_errors_to_message(
                validation_errors,
            )));
        }

        if let Some(role_id) = payload.role_id.as_deref() {
            if RoleRepository::new(self.pool)
                .get_role_by_id(role_id)
                .await?
                .is_none()
            {
                return Err(ServiceError::not_found("Role", role_id));
            }
        }

        let user = UserRepository::new(self.pool)
            .update_user(id, &payload, actor.user_id())
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))?;

        Ok(user)
    }

    pub async fn delete_user(&self, id: &str, actor: &Claims) -> ServiceResult<()> {
        let deleted = UserRepository::new(self.pool)
            .soft_delete_user(id, actor.user_id())
            .await?;

        if !deleted {
            return Err(ServiceError::not_found("User", id));
        }

        Ok(())
    }
}
