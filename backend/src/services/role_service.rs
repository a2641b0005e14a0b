//! Role business logic service.

use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

use crate::api::common::{CreatedResponse, PaginationFilter, validation_errors_to_message};
use crate::database::models::{CreateRole, Role, RoleWithPermissions, UpdateRole};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::role_repository::RoleRepository;
use crate::utils::jwt::{ADMIN_ROLE, Claims};

pub struct RoleService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> RoleService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a role together with its permission grants.
    pub async fn create_role(
        &self,
        payload: CreateRole,
        actor: &Claims,
    ) -> ServiceResult<CreatedResponse> {
        if let Err(validation_errors) = payload.validate() {
            return Err(ServiceError::validation(validation_errors_to_message(
                validation_errors,
            )));
        }

        let repo = RoleRepository::new(self.pool);

        if repo.role_name_exists(&payload.name).await? {
            return Err(ServiceError::already_exists("Role", &payload.name));
        }

        let role = repo
            .create_role(
                &Uuid::now_v7().to_string(),
                &payload.name,
                &payload.description,
                payload.is_active.unwrap_or(true),
                actor.user_id(),
            )
            .await?;

        if !payload.permissions.is_empty() {
            repo.set_role_permissions(&role.id, &payload.permissions)
                .await?;
        }

        Ok(CreatedResponse {
            id: role.id,
            created_at: role.created_at,
        })
    }

    pub async fn get_roles(&self, pagination: &PaginationFilter) -> ServiceResult<(Vec<Role>, u64)> {
        let repo = RoleRepository::new(self.pool);

        let roles = repo.get_roles(pagination).await?;
        let total = repo.get_roles_count().await?;

        Ok((roles, total))
    }

    /// Retrieves a role by id with its permission grants populated.
    pub async fn get_role_required(&self, id: &str) -> ServiceResult<RoleWithPermissions> {
        let repo = RoleRepository::new(self.pool);

        let role = repo
            .get_role_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Role", id))?;

        let permissions = repo.get_permissions_by_role_id(id).await?;

        Ok(RoleWithPermissions { role, permissions })
    }

    /// Updates a role; when `permissions` is present the grant set is
    /// replaced wholesale.
    pub async fn update_role(
        &self,
        id: &str,
        payload: UpdateRole,
        actor: &Claims,
    ) -> ServiceResult<Role> {
        if let Err(validation_errors) = payload.validate() {
            return Err(ServiceError::validation(validation_errors_to_message(
                validation_errors,
            )));
        }

        let repo = RoleRepository::new(self.pool);

        let role = repo
            .update_role(
                id,
                payload.name.as_deref(),
                payload.description.as_deref(),
                payload.is_active,
                actor.user_id(),
            )
            .await?
            .ok_or_else(|| ServiceError::not_found("Role", id))?;

        if let Some(permissions) = payload.permissions {
            repo.set_role_permissions(id, &permissions).await?;
        }

        Ok(role)
    }

    /// Soft-deletes a role. The ADMIN role is protected.
    pub async fn delete_role(&self, id: &str, actor: &Claims) -> ServiceResult<()> {
        let repo = RoleRepository::new(self.pool);

        let role = repo
            .get_role_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Role", id))?;

        if role.name == ADMIN_ROLE {
            return Err(ServiceError::invalid_operation("Không thể xóa role ADMIN"));
        }

        repo.soft_delete_role(id, actor.user_id()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::RoleRef;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::migrate!().run(&pool).await.unwrap();
        pool
    }

    fn admin_claims() -> Claims {
        Claims {
            sub: "token login".to_string(),
            iss: "from server".to_string(),
            jti: "jti-1".to_string(),
            user_id: "admin-1".to_string(),
            name: "Admin".to_string(),
            email: "admin@x.com".to_string(),
            role: Some(RoleRef {
                id: "role-admin".to_string(),
                name: ADMIN_ROLE.to_string(),
            }),
            permissions: Vec::new(),
            exp: usize::MAX,
            iat: 0,
        }
    }

    #[tokio::test]
    async fn test_admin_role_cannot_be_deleted() {
        let pool = test_pool().await;
        let service = RoleService::new(&pool);
        let actor = admin_claims();

        let admin = RoleRepository::new(&pool)
            .get_role_by_name(ADMIN_ROLE)
            .await
            .unwrap()
            .unwrap();

        let err = service.delete_role(&admin.id, &actor).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidOperation { .. }));

        // Ordinary roles delete fine.
        let user_role = RoleRepository::new(&pool)
            .get_role_by_name("USER")
            .await
            .unwrap()
            .unwrap();
        service.delete_role(&user_role.id, &actor).await.unwrap();
        assert!(
            RoleRepository::new(&pool)
                .get_role_by_id(&user_role.id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_duplicate_role_name_rejected() {
        let pool = test_pool().await;
        let service = RoleService::new(&pool);

        let err = service
            .create_role(
                CreateRole {
                    name: "USER".to_string(),
                    description: "duplicate of the seeded role".to_string(),
                    is_active: None,
                    permissions: Vec::new(),
                },
                &admin_claims(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::AlreadyExists { .. }));
    }
}
