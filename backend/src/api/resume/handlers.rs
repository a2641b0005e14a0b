//! Handler functions for résumé API endpoints.
//!
//! Submission and the "by-user" listing act on the authenticated identity;
//! the management surface (list, status updates, deletion) requires a
//! permission grant.

use crate::api::common::{
    ApiResponse, CreatedResponse, PaginationFilter, PaginationMeta, service_error_to_http,
};
use crate::database::models::{CreateUserCv, Resume};
use crate::services::resume_service::ResumeService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
    response::Json as ResponseJson,
};
use serde::Deserialize;
use sqlx::SqlitePool;

/// Status-change payload for a résumé
#[derive(Debug, Deserialize)]
pub struct UpdateResumeStatus {
    pub status: String,
}

#[axum::debug_handler]
pub async fn create_resume(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateUserCv>,
) -> Result<ResponseJson<ApiResponse<CreatedResponse>>, (StatusCode, String)> {
    let service = ResumeService::new(&pool);

    match service.create_resume(payload, &claims).await {
        Ok(created) => Ok(ResponseJson(ApiResponse::success(
            created,
            "Create a new resume",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn get_resumes_by_user(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
) -> Result<ResponseJson<ApiResponse<Vec<Resume>>>, (StatusCode, String)> {
    let service = ResumeService::new(&pool);

    match service.get_resumes_by_user(&claims).await {
        Ok(resumes) => Ok(ResponseJson(ApiResponse::success(
            resumes,
            "Get Resumes by user",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn get_resumes(
    Extension(pool): Extension<SqlitePool>,
    Query(pagination): Query<PaginationFilter>,
) -> Result<ResponseJson<ApiResponse<Vec<Resume>>>, (StatusCode, String)> {
    let service = ResumeService::new(&pool);

    match service.get_resumes(&pagination).await {
        Ok((resumes, total)) => {
            let meta = PaginationMeta::from_filter(&pagination, total);
            Ok(ResponseJson(ApiResponse::paginated(
                resumes,
                meta,
                "Fetch resume with paginate",
            )))
        }
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn get_resume_by_id(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<Resume>>, (StatusCode, String)> {
    let service = ResumeService::new(&pool);

    match service.get_resume_required(&id).await {
        Ok(resume) => Ok(ResponseJson(ApiResponse::success(
            resume,
            "Fetch resume by id",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn update_resume_status(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateResumeStatus>,
) -> Result<ResponseJson<ApiResponse<Resume>>, (StatusCode, String)> {
    let service = ResumeService::new(&pool);

    match service
        .update_resume_status(&id, &payload.status, &claims)
        .await
    {
        Ok(resume) => Ok(ResponseJson(ApiResponse::success(
            resume,
            "Change status (update) resume",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn delete_resume(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<()>>, (StatusCode, String)> {
    let service = ResumeService::new(&pool);

    match service.delete_resume(&id, &claims).await {
        Ok(()) => Ok(ResponseJson(ApiResponse::success((), "Delete a resume"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}
