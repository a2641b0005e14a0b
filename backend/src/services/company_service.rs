//! Company business logic service.

use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

use crate::api::common::{CreatedResponse, PaginationFilter, validation_errors_to_message};
use crate::database::models::{Company, CreateCompany, UpdateCompany};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::company_repository::CompanyRepository;
use crate::utils::jwt::Claims;

pub struct CompanyService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> CompanyService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_company(
        &self,
        payload: CreateCompany,
        actor: &Claims,
    ) -> ServiceResult<CreatedResponse> {
        if let Err(validation_errors) = payload.validate() {
            return Err(ServiceError::validation(validation_errors_to_message(
                validation_errors,
            )));
        }

        let company = CompanyRepository::new(self.pool)
            .create_company(&Uuid::now_v7().to_string(), &payload, actor.user_id())
            .await?;

        Ok(CreatedResponse {
            id: company.id,
            created_at: company.created_at,
        })
    }

    pub async fn get_companies(
        &self,
        name: Option<&str>,
        pagination: &PaginationFilter,
    ) -> ServiceResult<(Vec<Company>, u64)> {
        let repo = CompanyRepository::new(self.pool);

        let companies = repo.get_companies(name, pagination).await?;
        let total = repo.get_companies_count(name).await?;

        Ok((companies, total))
    }

    pub async fn get_company_required(&self, id: &str) -> ServiceResult<Company> {
        let company = CompanyRepository::new(self.pool)
            .get_company_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Company", id))?;

        Ok(company)
    }

    pub async fn update_company(
        &self,
        id: &str,
        payload: UpdateCompany,
        actor: &Claims,
    ) -> ServiceResult<Company> {
        if let Err(validation_errors) = payload.validate() {
            return Err(ServiceError::validation(validation_errors_to_message(
                validation_errors,
            )));
        }

        let company = CompanyRepository::new(self.pool)
            .update_company(id, &payload, actor.user_id())
            .await?
            .ok_or_else(|| ServiceError::not_found("Company", id))?;

        Ok(company)
    }

    pub async fn delete_company(&self, id: &str, actor: &Claims) -> ServiceResult<()> {
        let deleted = CompanyRepository::new(self.pool)
            .soft_delete_company(id, actor.user_id())
            .await?;

        if !deleted {
            return Err(ServiceError::not_found("Company", id));
        }

        Ok(())
    }
}
