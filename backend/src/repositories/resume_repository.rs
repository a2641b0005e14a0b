//! Database repository for résumé (CV submission) operations.

use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::api::common::PaginationFilter;
use crate::database::models::Resume;

/// Repository for résumé database operations.
pub struct ResumeRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> ResumeRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_resume(
        &self,
        id: &str,
        email: &str,
        user_id: &str,
        url: &str,
        status: &str,
        company_id: &str,
        job_id: &str,
    ) -> Result<Resume> {
        let resume = sqlx::query_as::<_, Resume>(
            r#"
            INSERT INTO resumes
                (id, email, user_id, url, status, company_id, job_id,
                 created_by, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?3, ?8, ?8)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(user_id)
        .bind(url)
        .bind(status)
        .bind(company_id)
        .bind(job_id)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(resume)
    }

    pub async fn get_resume_by_id(&self, id: &str) -> Result<Option<Resume>> {
        let resume =
            sqlx::query_as::<_, Resume>("SELECT * FROM resumes WHERE id = ?1 AND is_deleted = 0")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(resume)
    }

    pub async fn get_resumes(&self, pagination: &PaginationFilter) -> Result<Vec<Resume>> {
        let resumes = sqlx::query_as::<_, Resume>(
            r#"
            SELECT * FROM resumes
            WHERE is_deleted = 0
            ORDER BY created_at DESC
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        Ok(resumes)
    }

    pub async fn get_resumes_count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM resumes WHERE is_deleted = 0")
            .fetch_one(self.pool)
            .await?;

        Ok(count as u64)
    }

    /// All live submissions belonging to one user, newest first.
    pub async fn get_resumes_by_user_id(&self, user_id: &str) -> Result<Vec<Resume>> {
        let resumes = sqlx::query_as::<_, Resume>(
            r#"
            SELECT * FROM resumes
            WHERE user_id = ?1 AND is_deleted = 0
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(resumes)
    }

    pub async fn update_resume_status(
        &self,
        id: &str,
        status: &str,
        updated_by: &str,
    ) -> Result<Option<Resume>> {
        let resume = sqlx::query_as::<_, Resume>(
            r#"
            UPDATE resumes
            SET status = ?1, updated_by = ?2, updated_at = ?3
            WHERE id = ?4 AND is_deleted = 0
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(updated_by)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(resume)
    }

    pub async fn soft_delete_resume(&self, id: &str, deleted_by: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE resumes
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
