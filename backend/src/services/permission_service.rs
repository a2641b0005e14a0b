//! Permission business logic service.

use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

use crate::api::common::{CreatedResponse, PaginationFilter, validation_errors_to_message};
use crate::database::models::{CreatePermission, Permission, UpdatePermission};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::permission_repository::PermissionRepository;
use crate::utils::jwt::Claims;

pub struct PermissionService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> PermissionService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a permission; the (api path, method) pair must be unique.
    pub async fn create_permission(
        &self,
        payload: CreatePermission,
        actor: &Claims,
    ) -> ServiceResult<CreatedResponse> {
        if let Err(validation_errors) = payload.validate() {
            return Err(ServiceError::validation(validation_errors_to_message(
                validation_errors,
            )));
        }

        let repo = PermissionRepository::new(self.pool);

        if repo
            .api_path_method_exists(&payload.api_path, &payload.method)
            .await?
        {
            return Err(ServiceError::already_exists(
                "Permission",
                format!("{} {}", payload.method, payload.api_path),
            ));
        }

        let permission = repo
            .create_permission(&Uuid::now_v7().to_string(), &payload, actor.user_id())
            .await?;

        Ok(CreatedResponse {
            id: permission.id,
            created_at: permission.created_at,
        })
    }

    pub async fn get_permissions(
        &self,
        module: Option<&str>,
        pagination: &PaginationFilter,
    ) -> ServiceResult<(Vec<Permission>, u64)> {
        let repo = PermissionRepository::new(self.pool);

        let permissions = repo.get_permissions(module, pagination).await?;
        let total = repo.get_permissions_count(module).await?;

        Ok((permissions, total))
    }

    pub async fn get_permission_required(&self, id: &str) -> ServiceResult<Permission> {
        let permission = PermissionRepository::new(self.pool)
            .get_permission_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Permission", id))?;

        Ok(permission)
    }

    pub async fn update_permission(
        &self,
        id: &str,
        payload: UpdatePermission,
        actor: &Claims,
    ) -> ServiceResult<Permission> {
        if let Err(validation_errors) = payload.validate() {
            return Err(ServiceError::validation(validation_errors_to_message(
                validation_errors,
            )));
        }

        let permission = PermissionRepository::new(self.pool)
            .update_permission(id, &payload, actor.user_id())
            .await?
            .ok_or_else(|| ServiceError::not_found("Permission", id))?;

        Ok(permission)
    }

    pub async fn delete_permission(&self, id: &str, actor: &Claims) -> ServiceResult<()> {
        let deleted = PermissionRepository::new(self.pool)
            .soft_delete_permission(id, actor.user_id())
            .await?;

        if !deleted {
            return Err(ServiceError::not_found("Permission", id));
        }

        Ok(())
    }
}
