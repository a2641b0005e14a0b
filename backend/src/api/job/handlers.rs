//! Handler functions for job posting API endpoints.
//!
//! Listing and detail lookups are public; mutations require a permission
//! grant.

use crate::api::common::{
    ApiResponse, CreatedResponse, PaginationFilter, PaginationMeta, service_error_to_http,
};
use crate::database::models::{CreateJob, Job, UpdateJob};
use crate::services::job_service::JobService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
    response::Json as ResponseJson,
};
use serde::Deserialize;
use sqlx::SqlitePool;

/// Query parameters for the job list endpoint
#[derive(Debug, Deserialize)]
pub struct JobListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// Name substring filter
    pub name: Option<String>,
    /// Location substring filter
    pub location: Option<String>,
}

#[axum::debug_handler]
pub async fn create_job(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateJob>,
) -> Result<ResponseJson<ApiResponse<CreatedResponse>>, (StatusCode, String)> {
    let service = JobService::new(&pool);

    match service.create_job(payload, &claims).await {
        Ok(created) => Ok(ResponseJson(ApiResponse::success(
            created,
            "Create a new job",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn get_jobs(
    Extension(pool): Extension<SqlitePool>,
    Query(query): Query<JobListQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<Job>>>, (StatusCode, String)> {
    let service = JobService::new(&pool);
    let pagination = PaginationFilter {
        page: query.page,
        per_page: query.per_page,
    };

    match service
        .get_jobs(query.name.as_deref(), query.location.as_deref(), &pagination)
        .await
    {
        Ok((jobs, total)) => {
            let meta = PaginationMeta::from_filter(&pagination, total);
            Ok(ResponseJson(ApiResponse::paginated(
                jobs,
                meta,
                "Fetch job with paginate",
            )))
        }
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn get_job_by_id(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<Job>>, (StatusCode, String)> {
    let service = JobService::new(&pool);

    match service.get_job_required(&id).await {
        Ok(job) => Ok(ResponseJson(ApiResponse::success(job, "Fetch a job by id"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn update_job(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateJob>,
) -> Result<ResponseJson<ApiResponse<Job>>, (StatusCode, String)> {
    let service = JobService::new(&pool);

    match service.update_job(&id, payload, &claims).await {
        Ok(job) => Ok(ResponseJson(ApiResponse::success(job, "Update a job"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn delete_job(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<()>>, (StatusCode, String)> {
    let service = JobService::new(&pool);

    match service.delete_job(&id, &claims).await {
        Ok(()) => Ok(ResponseJson(ApiResponse::success((), "Delete a job"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}
