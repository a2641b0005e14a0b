//! Job posting business logic service.

use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

use crate::api::common::{CreatedResponse, PaginationFilter, validation_errors_to_message};
use crate::database::models::{CreateJob, Job, UpdateJob};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::company_repository::CompanyRepository;
use crate::repositories::job_repository::JobRepository;
use crate::utils::jwt::Claims;

pub struct JobService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> JobService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a job posting; the referenced company must exist.
    pub async fn create_job(
        &self,
        payload: CreateJob,
        actor: &Claims,
    ) -> ServiceResult<CreatedResponse> {
        if let Err(validation_errors) = payload.validate() {
            return Err(ServiceError::validation(validation_errors_to_message(
                validation_errors,
            )));
        }

        if CompanyRepository::new(self.pool)
            .get_company_by_id(&payload.company.id)
            .await?
            .is_none()
        {
            return Err(ServiceError::not_found("Company", &payload.company.id));
        }

        let job = JobRepository::new(self.pool)
            .create_job(&Uuid::now_v7().to_string(), &payload, actor.user_id())
            .await?;

        Ok(CreatedResponse {
            id: job.id,
            created_at: job.created_at,
        })
    }

    pub async fn get_jobs(
        &self,
        name: Option<&str>,
        location: Option<&str>,
        pagination: &PaginationFilter,
    ) -> ServiceResult<(Vec<Job>, u64)> {
        let repo = JobRepository::new(self.pool);

        let jobs = repo.get_jobs(name, location, pagination).await?;
        let total = repo.get_jobs_count(name, location).await?;

        Ok((jobs, total))
    }

    pub async fn get_job_required(&self, id: &str) -> ServiceResult<Job> {
        let job = JobRepository::new(self.pool)
            .get_job_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Job", id))?;

        Ok(job)
    }

    pub async fn update_job(
        &self,
        id: &str,
        payload: UpdateJob,
        actor: &Claims,
    ) -> ServiceResult<Job> {
        if let Err(validation_errors) = payload.validate() {
            return Err(ServiceError::validation(validation_errors_to_message(
                validation_errors,
            )));
        }

        let job = JobRepository::new(self.pool)
            .update_job(id, &payload, actor.user_id())
            .await?
            .ok_or_else(|| ServiceError::not_found("Job", id))?;

        Ok(job)
    }

    pub async fn delete_job(&self, id: &str, actor: &Claims) -> ServiceResult<()> {
        let deleted = JobRepository::new(self.pool)
            .soft_delete_job(id, actor.user_id())
            .await?;

        if !deleted {
            return Err(ServiceError::not_found("Job", id));
        }

        Ok(())
    }
}
