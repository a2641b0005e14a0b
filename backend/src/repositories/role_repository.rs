//! Database repository for role management operations.
//!
//! Provides role CRUD plus permission-grant resolution: given a role id,
//! the set of permissions granted through the `role_permissions` table.

use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::api::common::PaginationFilter;
use crate::database::models::{Permission, Role};

/// Repository for role database operations.
pub struct RoleRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> RoleRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_role(
        &self,
        id: &str,
        name: &str,
        description: &str,
        is_active: bool,
        created_by: &str,
    ) -> Result<Role> {
        let role = sqlx::query_as::<_, Role>(
            r#"
            INSERT INTO roles (id, name, description, is_active, created_by, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(is_active)
        .bind(created_by)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(role)
    }

    /// Retrieves a role by its unique identifier.
    ///
    /// # Returns
    /// `Some(Role)` if found and not deleted, `None` otherwise
    pub async fn get_role_by_id(&self, id: &str) -> Result<Option<Role>> {
        let role =
            sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE id = ?1 AND is_deleted = 0")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(role)
    }

    /// Retrieves a role by its exact name.
    ///
    /// # Use Case
    /// Registration resolves the default "USER" role this way.
    pub async fn get_role_by_name(&self, name: &str) -> Result<Option<Role>> {
        let role =
            sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE name = ?1 AND is_deleted = 0")
                .bind(name)
                .fetch_optional(self.pool)
                .await?;

        Ok(role)
    }

    pub async fn role_name_exists(&self, name: &str) -> Result<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM roles WHERE name = ?1 AND is_deleted = 0")
                .bind(name)
                .fetch_one(self.pool)
                .await?;

        Ok(count > 0)
    }

    pub async fn get_roles(&self, pagination: &PaginationFilter) -> Result<Vec<Role>> {
        let roles = sqlx::query_as::<_, Role>(
            r#"
            SELECT * FROM roles
            WHERE is_deleted = 0
            ORDER BY created_at DESC
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        Ok(roles)
    }

    pub async fn get_roles_count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM roles WHERE is_deleted = 0")
            .fetch_one(self.pool)
            .await?;

        Ok(count as u64)
    }

    pub async fn update_role(
        &self,
        id: &str,
        name: Option<&str>,
        description: Option<&str>,
        is_active: Option<bool>,
        updated_by: &str,
    ) -> Result<Option<Role>> {
        let role = sqlx::query_as::<_, Role>(
            r#"
            UPDATE roles SET
                name = COALESCE(?1, name),
                description = COALESCE(?2, description),
                is_active = COALESCE(?3, is_active),
                updated_by = ?4,
                updated_at = ?5
            WHERE id = ?6 AND is_deleted = 0
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(is_active)
        .bind(updated_by)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(role)
    }

    pub async fn soft_delete_role(&self, id: &str, deleted_by: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE roles
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

    /// Resolves the permission set granted to a role.
    ///
    /// Returns an empty vector for an unknown role id or a role without
    /// grants; a missing role never fails the caller's flow.
    pub async fn get_permissions_by_role_id(&self, role_id: &str) -> Result<Vec<Permission>> {
        let permissions = sqlx::query_as::<_, Permission>(
            r#"
            SELECT p.* FROM permissions p
            JOIN role_permissions rp ON rp.permission_id = p.id
            WHERE rp.role_id = ?1 AND p.is_deleted = 0
            "#,
        )
        .bind(role_id)
        .fetch_all(self.pool)
        .await?;

        Ok(permissions)
    }

    /// Replaces a role's permission grants with the given set.
    pub async fn set_role_permissions(&self, role_id: &str, permission_ids: &[String]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM role_permissions WHERE role_id = ?1")
            .bind(role_id)
            .execute(&mut *tx)
            .await?;

        for permission_id in permission_ids {
            sqlx::query("INSERT OR IGNORE INTO role_permissions (role_id, permission_id) VALUES (?1, ?2)")
                .bind(role_id)
                .bind(permission_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
