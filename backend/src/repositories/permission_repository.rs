//! Database repository for permission management operations.

use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::api::common::PaginationFilter;
use crate::database::models::{CreatePermission, Permission, UpdatePermission};

/// Repository for permission database operations.
pub struct PermissionRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> PermissionRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_permission(
        &self,
        id: &str,
        permission: &CreatePermission,
        created_by: &str,
    ) -> Result<Permission> {
        let permission = sqlx::query_as::<_, Permission>(
            r#"
            INSERT INTO permissions
                (id, name, api_path, method, module, created_by, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&permission.name)
        .bind(&permission.api_path)
        .bind(&permission.method)
        .bind(&permission.module)
        .bind(created_by)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(permission)
    }

    pub async fn get_permission_by_id(&self, id: &str) -> Result<Option<Permission>> {
        let permission = sqlx::query_as::<_, Permission>(
            "SELECT * FROM permissions WHERE id = ?1 AND is_deleted = 0",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(permission)
    }

    /// Checks if a grant for this exact (api path, method) pair exists.
    pub async fn api_path_method_exists(&self, api_path: &str, method: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM permissions WHERE api_path = ?1 AND method = ?2 AND is_deleted = 0",
        )
        .bind(api_path)
        .bind(method)
        .fetch_one(self.pool)
        .await?;

        Ok(count > 0)
    }

    /// Retrieves a page of permissions, optionally filtered by module name.
    pub async fn get_permissions(
        &self,
        module: Option<&str>,
        pagination: &PaginationFilter,
    ) -> Result<Vec<Permission>> {
        let permissions = sqlx::query_as::<_, Permission>(
            r#"
            SELECT * FROM permissions
            WHERE is_deleted = 0 AND (?1 IS NULL OR module = ?1)
            ORDER BY created_at DESC
            LIMIT ?2 OFFSET ?3
            "#,
        )
        .bind(module)
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        Ok(permissions)
    }

    pub async fn get_permissions_count(&self, module: Option<&str>) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM permissions WHERE is_deleted = 0 AND (?1 IS NULL OR module = ?1)",
        )
        .bind(module)
        .fetch_one(self.pool)
        .await?;

        Ok(count as u64)
    }

    pub async fn update_permission(
        &self,
        id: &str,
        update: &UpdatePermission,
        updated_by: &str,
    ) -> Result<Option<Permission>> {
        let permission = sqlx::query_as::<_, Permission>(
            r#"
            UPDATE permissions SET
                name = COALESCE(?1, name),
                api_path = COALESCE(?2, api_path),
                method = COALESCE(?3, method),
                module = COALESCE(?4, module),
                updated_by = ?5,
                updated_at = ?6
            WHERE id = ?7 AND is_deleted = 0
            RETURNING *
            "#,
        )
        .bind(&update.name)
        .bind(&update.api_path)
        .bind(&update.method)
        .bind(&update.module)
        .bind(updated_by)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(permission)
    }

    pub async fn soft_delete_permission(&self, id: &str, deleted_by: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE permissions
            SET is_deleted = 1, deleted_at = ?1, deleted_by = ?2, updated_at = ?1
            WHERE id = ?3 AND is_deleted = 0
            "#,
        )
        .bind(Utc::now())
        .bind(deleted_by)
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
