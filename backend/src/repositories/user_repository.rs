//! Database repository for user management operations.
//!
//! Provides CRUD operations for system users plus the refresh-token
//! persistence used by the authentication flow.

use crate::api::common::PaginationFilter;
use crate::database::models::{CreateUser, UpdateUser, User};
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

/// Repository for user database operations.
///
/// Handles all persistence operations for the User entity. Every read
/// excludes soft-deleted rows.
pub struct UserRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new user in the database.
    ///
    /// # Arguments
    /// * `user` - Fully-resolved insert row (password already hashed)
    ///
    /// # Returns
    /// The newly created User with all fields populated
    pub async fn create_user(&self, user: CreateUser) -> Result<User> {
        let now = Utc::now();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users
                (id, name, email, password_hash, age, gender, address, role_id,
                 created_by, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(user.name)
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.age)
        .bind(user.gender)
        .bind(user.address)
        .bind(user.role_id)
        .bind(user.created_by)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(user)
    }

    /// Retrieves a user by their unique identifier.
    ///
    /// # Returns
    /// `Some(User)` if found and not deleted, `None` otherwise
    pub async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let user =
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?1 AND is_deleted = 0")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(user)
    }

    /// Retrieves a user by their email (exact, case-sensitive match).
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user =
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?1 AND is_deleted = 0")
                .bind(email)
                .fetch_optional(self.pool)
                .await?;

        Ok(user)
    }

    /// Checks if an email is already taken by a live user.
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE email = ?1 AND is_deleted = 0",
        )
        .bind(email)
        .fetch_one(self.pool)
        .await?;

        Ok(count > 0)
    }

    /// Retrieves a page of users ordered by creation time, newest first.
    pub async fn get_users(&self, pagination: &PaginationFilter) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE is_deleted = 0
            ORDER BY created_at DESC
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    /// Get total count of live users
    pub async fn get_users_count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE is_deleted = 0")
            .fetch_one(self.pool)
            .await?;

        Ok(count as u64)
    }

    /// Applies a partial update; absent fields keep their current value.
    pub async fn update_user(
        &self,
        id: &str,
        update: &UpdateUser,
        updated_by: &str,
    ) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                name = COALESCE(?1, name),
                age = COALESCE(?2, age),
                gender = COALESCE(?3, gender),
                address = COALESCE(?4, address),
                role_id = COALESCE(?5, role_id),
                updated_by = ?6,
                updated_at = ?7
            WHERE id = ?8 AND is_deleted = 0
            RETURNING *
            "#,
        )
        .bind(&update.name)
        .bind(update.age)
        .bind(&update.gender)
        .bind(&update.address)
        .bind(&update.role_id)
        .bind(updated_by)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Marks a user deleted without removing the row.
    pub async fn soft_delete_user(&self, id: &str, deleted_by: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
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

    /// Stores the user's current refresh token, overwriting any prior value.
    ///
    /// Overwrite is the rotation mechanism: only the most recently stored
    /// token can be exchanged. An empty string means "no valid session".
    pub async fn update_refresh_token(&self, id: &str, refresh_token: &str) -> Result<()> {
        sqlx::query("UPDATE users SET refresh_token = ?1, updated_at = ?2 WHERE id = ?3")
            .bind(refresh_token)
            .bind(Utc::now())
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Finds the user whose stored refresh token exactly equals the
    /// presented one.
    pub async fn find_user_by_refresh_token(&self, refresh_token: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE refresh_token = ?1 AND is_deleted = 0",
        )
        .bind(refresh_token)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }
}
