//! Handler functions for newsletter subscriber API endpoints.
//!
//! Users manage their own subscription (create, update, skills lookup);
//! the listing and deletion surface requires a permission grant.

use crate::api::common::{
    ApiResponse, CreatedResponse, PaginationFilter, PaginationMeta, service_error_to_http,
};
use crate::database::models::{CreateSubscriber, Subscriber, UpdateSubscriber};
use crate::services::subscriber_service::SubscriberService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;

#[axum::debug_handler]
pub async fn create_subscriber(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateSubscriber>,
) -> Result<ResponseJson<ApiResponse<CreatedResponse>>, (StatusCode, String)> {
    let service = SubscriberService::new(&pool);

    match service.create_subscriber(payload, &claims).await {
        Ok(created) => Ok(ResponseJson(ApiResponse::success(
            created,
            "Create a subscriber",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn get_subscribers(
    Extension(pool): Extension<SqlitePool>,
    Query(pagination): Query<PaginationFilter>,
) -> Result<ResponseJson<ApiResponse<Vec<Subscriber>>>, (StatusCode, String)> {
    let service = SubscriberService::new(&pool);

    match service.get_subscribers(&pagination).await {
        Ok((subscribers, total)) => {
            let meta = PaginationMeta::from_filter(&pagination, total);
            Ok(ResponseJson(ApiResponse::paginated(
                subscribers,
                meta,
                "Fetch subscribers with paginate",
            )))
        }
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Skills the acting user subscribed to
#[axum::debug_handler]
pub async fn get_skills(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
) -> Result<ResponseJson<ApiResponse<Vec<String>>>, (StatusCode, String)> {
    let service = SubscriberService::new(&pool);

    match service.get_skills(&claims).await {
        Ok(skills) => Ok(ResponseJson(ApiResponse::success(
            skills,
            "Get subscriber's skills",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn get_subscriber_by_id(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<Subscriber>>, (StatusCode, String)> {
    let service = SubscriberService::new(&pool);

    match service.get_subscriber_required(&id).await {
        Ok(subscriber) => Ok(ResponseJson(ApiResponse::success(
            subscriber,
            "Fetch subscriber by id",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Update the acting user's subscription, creating it when absent
#[axum::debug_handler]
pub async fn update_subscriber(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateSubscriber>,
) -> Result<ResponseJson<ApiResponse<Subscriber>>, (StatusCode, String)> {
    let service = SubscriberService::new(&pool);

    match service.update_own_subscription(payload, &claims).await {
        Ok(subscriber) => Ok(ResponseJson(ApiResponse::success(
            subscriber,
            "Update a subscriber",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn delete_subscriber(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<()>>, (StatusCode, String)> {
    let service = SubscriberService::new(&pool);

    match service.delete_subscriber(&id, &claims).await {
        Ok(()) => Ok(ResponseJson(ApiResponse::success(
            (),
            "Delete a subscriber",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}
