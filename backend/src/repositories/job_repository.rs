//! Database repository for job posting operations.

use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::types::Json;

use crate::api::common::PaginationFilter;
use crate::database::models::{CreateJob, Job, UpdateJob};

/// Repository for job database operations.
pub struct JobRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> JobRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_job(&self, id: &str, job: &CreateJob, created_by: &str) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs
                (id, name, skills, company_id, company_name, location, salary, quantity,
                 level, start_date, end_date, is_active, created_by, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?14)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&job.name)
        .bind(Json(&job.skills))
        .bind(&job.company.id)
        .bind(&job.company.name)
        .bind(&job.location)
        .bind(job.salary)
        .bind(job.quantity)
        .bind(&job.level)
        .bind(job.start_date)
        .bind(job.end_date)
        .bind(job.is_active)
        .bind(created_by)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(job)
    }

    pub async fn get_job_by_id(&self, id: &str) -> Result<Option<Job>> {
        let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = ?1 AND is_deleted = 0")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(job)
    }

    /// Retrieves a page of jobs, optionally filtered by name and location
    /// substrings.
    pub async fn get_jobs(
        &self,
        name: Option<&str>,
        location: Option<&str>,
        pagination: &PaginationFilter,
    ) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(
            r#"
            SELECT * FROM jobs
            WHERE is_deleted = 0
              AND (?1 IS NULL OR name LIKE '%' || ?1 || '%')
              AND (?2 IS NULL OR location LIKE '%' || ?2 || '%')
            ORDER BY created_at DESC
            LIMIT ?3 OFFSET ?4
            "#,
        )
        .bind(name)
        .bind(location)
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        Ok(jobs)
    }

    pub async fn get_jobs_count(&self, name: Option<&str>, location: Option<&str>) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM jobs
            WHERE is_deleted = 0
              AND (?1 IS NULL OR name LIKE '%' || ?1 || '%')
              AND (?2 IS NULL OR location LIKE '%' || ?2 || '%')
            "#,
        )
        .bind(name)
        .bind(location)
        .fetch_one(self.pool)
        .await?;

        Ok(count as u64)
    }

    pub async fn update_job(
        &self,
        id: &str,
        update: &UpdateJob,
        updated_by: &str,
    ) -> Result<Option<Job>> {
        let skills = update.skills.as_ref().map(Json);

        let job = sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs SET
                name = COALESCE(?1, name),
                skills = COALESCE(?2, skills),
                location = COALESCE(?3, location),
                salary = COALESCE(?4, salary),
                quantity = COALESCE(?5, quantity),
                level = COALESCE(?6, level),
                start_date = COALESCE(?7, start_date),
                end_date = COALESCE(?8, end_date),
                is_active = COALESCE(?9, is_active),
                updated_by = ?10,
                updated_at = ?11
            WHERE id = ?12 AND is_deleted = 0
            RETURNING *
            "#,
        )
        .bind(&update.name)
        .bind(skills)
        .bind(&update.location)
        .bind(update.salary)
        .bind(update.quantity)
        .bind(&update.level)
        .bind(update.start_date)
        .bind(update.end_date)
        .bind(update.is_active)
        .bind(updated_by)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(job)
    }

    pub async fn soft_delete_job(&self, id: &str, deleted_by: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE jobs
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
