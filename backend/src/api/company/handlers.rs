//! Handler functions for company management API endpoints.
//!
//! Listing and detail lookups are public so the job board can be browsed
//! without an account; mutations require a permission grant.

use crate::api::common::{
    ApiResponse, CreatedResponse, PaginationFilter, PaginationMeta, service_error_to_http,
};
use crate::database::models::{Company, CreateCompany, UpdateCompany};
use crate::services::company_service::CompanyService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
    response::Json as ResponseJson,
};
use serde::Deserialize;
use sqlx::SqlitePool;

/// Query parameters for the company list endpoint
#[derive(Debug, Deserialize)]
pub struct CompanyListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// Name substring filter
    pub name: Option<String>,
}

#[axum::debug_handler]
pub async fn create_company(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateCompany>,
) -> Result<ResponseJson<ApiResponse<CreatedResponse>>, (StatusCode, String)> {
    let service = CompanyService::new(&pool);

    match service.create_company(payload, &claims).await {
        Ok(created) => Ok(ResponseJson(ApiResponse::success(
            created,
            "Create a new company",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn get_companies(
    Extension(pool): Extension<SqlitePool>,
    Query(query): Query<CompanyListQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<Company>>>, (StatusCode, String)> {
    let service = CompanyService::new(&pool);
    let pagination = PaginationFilter {
        page: query.page,
        per_page: query.per_page,
    };

    match service
        .get_companies(query.name.as_deref(), &pagination)
        .await
    {
        Ok((companies, total)) => {
            let meta = PaginationMeta::from_filter(&pagination, total);
            Ok(ResponseJson(ApiResponse::paginated(
                companies,
                meta,
                "Fetch company with paginate",
            )))
        }
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn get_company_by_id(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<Company>>, (StatusCode, String)> {
    let service = CompanyService::new(&pool);

    match service.get_company_required(&id).await {
        Ok(company) => Ok(ResponseJson(ApiResponse::success(
            company,
            "Fetch company by id",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn update_company(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCompany>,
) -> Result<ResponseJson<ApiResponse<Company>>, (StatusCode, String)> {
    let service = CompanyService::new(&pool);

    match service.update_company(&id, payload, &claims).await {
        Ok(company) => Ok(ResponseJson(ApiResponse::success(
            company,
            "Update a company",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn delete_company(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<()>>, (StatusCode, String)> {
    let service = CompanyService::new(&pool);

    match service.delete_company(&id, &claims).await {
        Ok(()) => Ok(ResponseJson(ApiResponse::success((), "Delete a company"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}
