//! Handler functions for user management API endpoints.
//!
//! These functions process requests for the admin-side user surface. The
//! acting identity is taken from the request extensions populated by the
//! authorization middleware.

use crate::api::common::{
    ApiResponse, CreatedResponse, PaginationFilter, PaginationMeta, service_error_to_http,
};
use crate::database::models::{CreateNewUser, UpdateUser, User};
use crate::services::user_service::UserService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;

#[axum::debug_handler]
pub async fn create_user(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateNewUser>,
) -> Result<ResponseJson<ApiResponse<CreatedResponse>>, (StatusCode, String)> {
    let service = UserService::new(&pool);

    match service.create_user(payload, &claims).await {
        Ok(created) => Ok(ResponseJson(ApiResponse::success(
            created,
            "Create a new user",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn get_users(
    Extension(pool): Extension<SqlitePool>,
    Query(pagination): Query<PaginationFilter>,
) -> Result<ResponseJson<ApiResponse<Vec<User>>>, (StatusCode, String)> {
    let service = UserService::new(&pool);

    match service.get_users(&pagination).await {
        Ok((users, total)) => {
            let meta = PaginationMeta::from_filter(&pagination, total);
            Ok(ResponseJson(ApiResponse::paginated(
                users,
                meta,
                "Fetch users with paginate",
            )))
        }
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn get_user_by_id(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<User>>, (StatusCode, String)> {
    let service = UserService::new(&pool);

    match service.get_user_required(&id).await {
        Ok(user) => Ok(ResponseJson(ApiResponse::success(user, "Fetch user by id"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn update_user(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUser>,
) -> Result<ResponseJson<ApiResponse<User>>, (StatusCode, String)> {
    let service = UserService::new(&pool);

    match service.update_user(&id, payload, &claims).await {
        Ok(user) => Ok(ResponseJson(ApiResponse::success(user, "Update a user"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn delete_user(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<()>>, (StatusCode, String)> {
    let service = UserService::new(&pool);

    match service.delete_user(&id, &claims).await {
        Ok(()) => Ok(ResponseJson(ApiResponse::success((), "Delete a user"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}
