//! Database repository for company management operations.

use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::api::common::PaginationFilter;
use crate::database::models::{Company, CreateCompany, UpdateCompany};

/// Repository for company database operations.
pub struct CompanyRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> CompanyRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_company(
        &self,
        id: &str,
        company: &CreateCompany,
        created_by: &str,
    ) -> Result<Company> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies
                (id, name, address, description, logo, created_by, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&company.name)
        .bind(&company.address)
        .bind(&company.description)
        .bind(&company.logo)
        .bind(created_by)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(company)
    }

    pub async fn get_company_by_id(&self, id: &str) -> Result<Option<Company>> {
        let company = sqlx::query_as::<_, Company>(
            "SELECT * FROM companies WHERE id = ?1 AND is_deleted = 0",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(company)
    }

    /// Retrieves a page of companies, optionally filtered by a name substring.
    pub async fn get_companies(
        &self,
        name: Option<&str>,
        pagination: &PaginationFilter,
    ) -> Result<Vec<Company>> {
        let companies = sqlx::query_as::<_, Company>(
            r#"
            SELECT * FROM companies
            WHERE is_deleted = 0 AND (?1 IS NULL OR name LIKE '%' || ?1 || '%')
            ORDER BY created_at DESC
            LIMIT ?2 OFFSET ?3
            "#,
        )
        .bind(name)
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        Ok(companies)
    }

    pub async fn get_companies_count(&self, name: Option<&str>) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM companies
            WHERE is_deleted = 0 AND (?1 IS NULL OR name LIKE '%' || ?1 || '%')
            "#,
        )
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        Ok(count as u64)
    }

    pub async fn update_company(
        &self,
        id: &str,
        update: &UpdateCompany,
        updated_by: &str,
    ) -> Result<Option<Company>> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies SET
                name = COALESCE(?1, name),
                address = COALESCE(?2, address),
                description = COALESCE(?3, description),
                logo = COALESCE(?4, logo),
                updated_by = ?5,
                updated_at = ?6
            WHERE id = ?7 AND is_deleted = 0
            RETURNING *
            "#,
        )
        .bind(&update.name)
        .bind(&update.address)
        .bind(&update.description)
        .bind(&update.logo)
        .bind(updated_by)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(company)
    }

    pub async fn soft_delete_company(&self, id: &str, deleted_by: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE companies
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
