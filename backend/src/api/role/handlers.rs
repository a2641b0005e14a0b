//! Handler functions for role management API endpoints.

use crate::api::common::{
    ApiResponse, CreatedResponse, PaginationFilter, PaginationMeta, service_error_to_http,
};
use crate::database::models::{CreateRole, Role, RoleWithPermissions, UpdateRole};
use crate::services::role_service::RoleService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;

#[axum::debug_handler]
pub async fn create_role(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateRole>,
) -> Result<ResponseJson<ApiResponse<CreatedResponse>>, (StatusCode, String)> {
    let service = RoleService::new(&pool);

    match service.create_role(payload, &claims).await {
        Ok(created) => Ok(ResponseJson(ApiResponse::success(
            created,
            "Create a new role",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn get_roles(
    Extension(pool): Extension<SqlitePool>,
    Query(pagination): Query<PaginationFilter>,
) -> Result<ResponseJson<ApiResponse<Vec<Role>>>, (StatusCode, String)> {
    let service = RoleService::new(&pool);

    match service.get_roles(&pagination).await {
        Ok((roles, total)) => {
            let meta = PaginationMeta::from_filter(&pagination, total);
            Ok(ResponseJson(ApiResponse::paginated(
                roles,
                meta,
                "Fetch roles with paginate",
            )))
        }
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn get_role_by_id(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<RoleWithPermissions>>, (StatusCode, String)> {
    let service = RoleService::new(&pool);

    match service.get_role_required(&id).await {
        Ok(role) => Ok(ResponseJson(ApiResponse::success(role, "Fetch role by id"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn update_role(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateRole>,
) -> Result<ResponseJson<ApiResponse<Role>>, (StatusCode, String)> {
    let service = RoleService::new(&pool);

    match service.update_role(&id, payload, &claims).await {
        Ok(role) => Ok(ResponseJson(ApiResponse::success(role, "Update a role"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn delete_role(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<()>>, (StatusCode, String)> {
    let service = RoleService::new(&pool);

    match service.delete_role(&id, &claims).await {
        Ok(()) => Ok(ResponseJson(ApiResponse::success((), "Delete a role"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}
