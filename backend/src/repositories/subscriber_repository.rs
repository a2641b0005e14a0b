//! Database repository for newsletter subscriber operations.

use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::types::Json;

use crate::api::common::PaginationFilter;
use crate::database::models::Subscriber;

/// Repository for subscriber database operations.
pub struct SubscriberRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> SubscriberRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_subscriber(
        &self,
        id: &str,
        name: &str,
        email: &str,
        skills: &[String],
        created_by: &str,
    ) -> Result<Subscriber> {
        let subscriber = sqlx::query_as::<_, Subscriber>(
            r#"
            INSERT INTO subscribers (id, name, email, skills, created_by, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(Json(skills))
        .bind(created_by)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(subscriber)
    }

    pub async fn get_subscriber_by_id(&self, id: &str) -> Result<Option<Subscriber>> {
        let subscriber = sqlx::query_as::<_, Subscriber>(
            "SELECT * FROM subscribers WHERE id = ?1 AND is_deleted = 0",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(subscriber)
    }

    pub async fn get_subscriber_by_email(&self, email: &str) -> Result<Option<Subscriber>> {
        let subscriber = sqlx::query_as::<_, Subscriber>(
            "SELECT * FROM subscribers WHERE email = ?1 AND is_deleted = 0",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(subscriber)
    }

    pub async fn get_subscribers(&self, pagination: &PaginationFilter) -> Result<Vec<Subscriber>> {
        let subscribers = sqlx::query_as::<_, Subscriber>(
            r#"
            SELECT * FROM subscribers
            WHERE is_deleted = 0
            ORDER BY created_at DESC
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        Ok(subscribers)
    }

    pub async fn get_subscribers_count(&self) -> Result<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM subscribers WHERE is_deleted = 0")
                .fetch_one(self.pool)
                .await?;

        Ok(count as u64)
    }

    /// Updates the subscription belonging to an email address.
    pub async fn update_subscriber_by_email(
        &self,
        email: &str,
        name: Option<&str>,
        skills: Option<&[String]>,
        updated_by: &str,
    ) -> Result<Option<Subscriber>> {
        let skills = skills.map(Json);

        let subscriber = sqlx::query_as::<_, Subscriber>(
            r#"
            UPDATE subscribers SET
                name = COALESCE(?1, name),
                skills = COALESCE(?2, skills),
                updated_by = ?3,
                updated_at = ?4
            WHERE email = ?5 AND is_deleted = 0
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(skills)
        .bind(updated_by)
        .bind(Utc::now())
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(subscriber)
    }

    pub async fn soft_delete_subscriber(&self, id: &str, deleted_by: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE subscribers
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
