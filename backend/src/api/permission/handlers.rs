//! Handler functions for permission management API endpoints.

use crate::api::common::{
    ApiResponse, CreatedResponse, PaginationFilter, PaginationMeta, service_error_to_http,
};
use crate::database::models::{CreatePermission, Permission, UpdatePermission};
use crate::services::permission_service::PermissionService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
    response::Json as ResponseJson,
};
use serde::Deserialize;
use sqlx::SqlitePool;

/// Query parameters for the permission list endpoint
#[derive(Debug, Deserialize)]
pub struct PermissionListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// Exact module filter
    pub module: Option<String>,
}

#[axum::debug_handler]
pub async fn create_permission(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreatePermission>,
) -> Result<ResponseJson<ApiResponse<CreatedResponse>>, (StatusCode, String)> {
    let service = PermissionService::new(&pool);

    match service.create_permission(payload, &claims).await {
        Ok(created) => Ok(ResponseJson(ApiResponse::success(
            created,
            "Create a new permission",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn get_permissions(
    Extension(pool): Extension<SqlitePool>,
    Query(query): Query<PermissionListQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<Permission>>>, (StatusCode, String)> {
    let service = PermissionService::new(&pool);
    let pagination = PaginationFilter {
        page: query.page,
        per_page: query.per_page,
    };

    match service
        .get_permissions(query.module.as_deref(), &pagination)
        .await
    {
        Ok((permissions, total)) => {
            let meta = PaginationMeta::from_filter(&pagination, total);
            Ok(ResponseJson(ApiResponse::paginated(
                permissions,
                meta,
                "Fetch permissions with paginate",
            )))
        }
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn get_permission_by_id(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<Permission>>, (StatusCode, String)> {
    let service = PermissionService::new(&pool);

    match service.get_permission_required(&id).await {
        Ok(permission) => Ok(ResponseJson(ApiResponse::success(
            permission,
            "Fetch permission by id",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn update_permission(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<UpdatePermission>,
) -> Result<ResponseJson<ApiResponse<Permission>>, (StatusCode, String)> {
    let service = PermissionService::new(&pool);

    match service.update_permission(&id, payload, &claims).await {
        Ok(permission) => Ok(ResponseJson(ApiResponse::success(
            permission,
            "Update a permission",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn delete_permission(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<()>>, (StatusCode, String)> {
    let service = PermissionService::new(&pool);

    match service.delete_permission(&id, &claims).await {
        Ok(()) => Ok(ResponseJson(ApiResponse::success(
            (),
            "Delete a permission",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}
