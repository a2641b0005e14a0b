//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for user authentication
//! (login, registration, token refresh, logout), manage the http-only
//! refresh-token cookie, and interact with the `auth::service` for core
//! business logic.

use crate::api::common::{ApiResponse, CreatedResponse, service_error_to_http};
use crate::auth::models::{AccountResponse, LoginRequest, LoginResponse};
use crate::auth::service::AuthService;
use crate::database::models::RegisterUser;
use crate::errors::ServiceError;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::Json as ResponseJson,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use sqlx::SqlitePool;

/// Cookie carrying the refresh token between refresh calls.
const REFRESH_COOKIE: &str = "refresh_token";

fn refresh_cookie(token: String, max_age_ms: u64) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, token))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::milliseconds(max_age_ms as i64))
        .build()
}

fn clearing_cookie() -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, "")).path("/").build()
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, ResponseJson<ApiResponse<LoginResponse>>), (StatusCode, String)> {
    let auth_service = match AuthService::new(&pool) {
        Ok(service) => service,
        Err(error) => return Err(service_error_to_http(error)),
    };

    // Credential check first; an unknown email and a wrong password
    // produce the same response.
    let user = match auth_service
        .validate_user(&payload.username, &payload.password)
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => {
            let body =
                ApiResponse::<()>::error("Username/password không hợp lệ", "unauthorized", None);
            return Err((
                StatusCode::UNAUTHORIZED,
                serde_json::to_string(&body).unwrap(),
            ));
        }
        Err(error) => return Err(service_error_to_http(error)),
    };

    match auth_service.login(user).await {
        Ok(session) => {
            let jar = jar.add(refresh_cookie(session.refresh_token, session.max_age_ms));
            Ok((
                jar,
                ResponseJson(ApiResponse::success(session.response, "User login")),
            ))
        }
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle user registration request
#[axum::debug_handler]
pub async fn register(
    Extension(pool): Extension<SqlitePool>,
    Json(payload): Json<RegisterUser>,
) -> Result<ResponseJson<ApiResponse<CreatedResponse>>, (StatusCode, String)> {
    let auth_service = match AuthService::new(&pool) {
        Ok(service) => service,
        Err(error) => return Err(service_error_to_http(error)),
    };

    match auth_service.register(payload).await {
        Ok(created) => Ok(ResponseJson(ApiResponse::success(
            created,
            "Register a new user",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle token refresh request: exchanges the cookie-carried refresh token
/// for a new access/refresh pair and re-sets the cookie
#[axum::debug_handler]
pub async fn refresh_token(
    Extension(pool): Extension<SqlitePool>,
    jar: CookieJar,
) -> Result<(CookieJar, ResponseJson<ApiResponse<LoginResponse>>), (StatusCode, String)> {
    let auth_service = match AuthService::new(&pool) {
        Ok(service) => service,
        Err(error) => return Err(service_error_to_http(error)),
    };

    let Some(cookie) = jar.get(REFRESH_COOKIE) else {
        return Err(service_error_to_http(ServiceError::InvalidRefreshToken));
    };
    let presented = cookie.value().to_string();

    match auth_service.process_refresh(&presented).await {
        Ok(session) => {
            let jar = jar
                .remove(clearing_cookie())
                .add(refresh_cookie(session.refresh_token, session.max_age_ms));
            Ok((
                jar,
                ResponseJson(ApiResponse::success(
                    session.response,
                    "Get user by refresh token",
                )),
            ))
        }
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle logout request: clears the stored refresh token and the cookie
#[axum::debug_handler]
pub async fn logout(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    jar: CookieJar,
) -> Result<(CookieJar, ResponseJson<ApiResponse<String>>), (StatusCode, String)> {
    let auth_service = match AuthService::new(&pool) {
        Ok(service) => service,
        Err(error) => return Err(service_error_to_http(error)),
    };

    match auth_service.logout(claims.user_id()).await {
        Ok(()) => {
            let jar = jar.remove(clearing_cookie());
            Ok((
                jar,
                ResponseJson(ApiResponse::success("ok".to_string(), "Logout User")),
            ))
        }
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Get current user information from the request's resolved identity
#[axum::debug_handler]
pub async fn account(
    Extension(claims): Extension<Claims>,
) -> ResponseJson<ApiResponse<AccountResponse>> {
    ResponseJson(ApiResponse::success(
        AccountResponse {
            user: claims.auth_user(),
        },
        "Get user information",
    ))
}
