//! Résumé (CV submission) business logic service.

use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

use crate::api::common::{CreatedResponse, PaginationFilter, validation_errors_to_message};
use crate::database::models::{CreateUserCv, Resume};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::company_repository::CompanyRepository;
use crate::repositories::job_repository::JobRepository;
use crate::repositories::resume_repository::ResumeRepository;
use crate::utils::jwt::Claims;

/// Status given to a freshly submitted CV.
const INITIAL_STATUS: &str = "PENDING";

pub struct ResumeService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> ResumeService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Submits a CV on behalf of the acting user; email and user id come
    /// from the authenticated identity, never from the payload.
    pub async fn create_resume(
        &self,
        payload: CreateUserCv,
        actor: &Claims,
    ) -> ServiceResult<CreatedResponse> {
        if let Err(validation_errors) = payload.validate() {
            return Err(ServiceError::validation(validation_errors_to_message(
                validation_errors,
            )));
        }

        if CompanyRepository::new(self.pool)
            .get_company_by_id(&payload.company_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::not_found("Company", &payload.company_id));
        }

        if JobRepository::new(self.pool)
            .get_job_by_id(&payload.job_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::not_found("Job", &payload.job_id));
        }

        let resume = ResumeRepository::new(self.pool)
            .create_resume(
                &Uuid::now_v7().to_string(),
                &actor.email,
                actor.user_id(),
                &payload.url,
                INITIAL_STATUS,
                &payload.company_id,
                &payload.job_id,
            )
            .await?;

        Ok(CreatedResponse {
            id: resume.id,
            created_at: resume.created_at,
        })
    }

    pub async fn get_resumes(
        &self,
        pagination: &PaginationFilter,
    ) -> ServiceResult<(Vec<Resume>, u64)> {
        let repo = ResumeRepository::new(self.pool);

        let resumes = repo.get_resumes(pagination).await?;
        let total = repo.get_resumes_count().await?;

        Ok((resumes, total))
    }

    pub async fn get_resume_required(&self, id: &str) -> ServiceResult<Resume> {
        let resume = ResumeRepository::new(self.pool)
            .get_resume_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Resume", id))?;

        Ok(resume)
    }

    /// All submissions belonging to the acting user.
    pub async fn get_resumes_by_user(&self, actor: &Claims) -> ServiceResult<Vec<Resume>> {
        let resumes = ResumeRepository::new(self.pool)
            .get_resumes_by_user_id(actor.user_id())
            .await?;

        Ok(resumes)
    }

    pub async fn update_resume_status(
        &self,
        id: &str,
        status: &str,
        actor: &Claims,
    ) -> ServiceResult<Resume> {
        if status.trim().is_empty() {
            return Err(ServiceError::validation("Status is required"));
        }

        let resume = ResumeRepository::new(self.pool)
            .update_resume_status(id, status, actor.user_id())
            .await?
            .ok_or_else(|| ServiceError::not_found("Resume", id))?;

        Ok(resume)
    }

    pub async fn delete_resume(&self, id: &str, actor: &Claims) -> ServiceResult<()> {
        let deleted = ResumeRepository::new(self.pool)
            .soft_delete_resume(id, actor.user_id())
            .await?;

        if !deleted {
            return Err(ServiceError::not_found("Resume", id));
        }

        Ok(())
    }
}
