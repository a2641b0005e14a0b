//! Shared response envelope and error mapping for the HTTP surface.
//!
//! Every endpoint answers with the same JSON envelope: a success flag, the
//! payload, a human-readable message, optional error details, and optional
//! pagination metadata. Service-layer errors are translated to HTTP status
//! codes in one place so handlers stay thin.

use crate::errors::ServiceError;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Response envelope shared by all endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            error: None,
            pagination: None,
            timestamp: now_rfc3339(),
        }
    }

    pub fn paginated(data: T, pagination: PaginationMeta, message: impl Into<String>) -> Self {
        Self {
            pagination: Some(pagination),
            ..Self::success(data, message)
        }
    }

    pub fn error(
        message: impl Into<String>,
        error_type: impl Into<String>,
        details: Option<Vec<FieldError>>,
    ) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: message.into(),
            error: Some(ErrorDetails {
                error_type: error_type.into(),
                details,
            }),
            pagination: None,
            timestamp: now_rfc3339(),
        }
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// Machine-readable error category plus optional per-field details.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub error_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Creation acknowledgement returned by every create endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Page/per-page query parameters, both optional, 1-indexed.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct PaginationFilter {
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub per_page: Option<u32>,
}

impl PaginationFilter {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn per_page(&self) -> u32 {
        self.per_page.unwrap_or(10)
    }

    /// Offset for database queries.
    pub fn offset(&self) -> u64 {
        ((self.page() - 1) * self.per_page()) as u64
    }

    /// Limit for database queries.
    pub fn limit(&self) -> u64 {
        self.per_page() as u64
    }
}

impl Default for PaginationFilter {
    fn default() -> Self {
        Self {
            page: Some(1),
            per_page: Some(10),
        }
    }
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub current_page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    /// An empty result set still counts as one page.
    pub fn new(current_page: u32, per_page: u32, total_items: u64) -> Self {
        let total_pages = (total_items.div_ceil(per_page as u64).max(1)) as u32;

        Self {
            current_page,
            per_page,
            total_items,
            total_pages,
            has_next: current_page < total_pages,
            has_prev: current_page > 1,
        }
    }

    pub fn from_filter(filter: &PaginationFilter, total_items: u64) -> Self {
        Self::new(filter.page(), filter.per_page(), total_items)
    }
}

/// Maps a service error onto an HTTP status and a serialized envelope body.
pub fn service_error_to_http(error: ServiceError) -> (StatusCode, String) {
    let (status, error_type, message) = match error {
        ServiceError::Validation { message } => {
            (StatusCode::BAD_REQUEST, "validation_error", message)
        }
        ServiceError::NotFound { entity, identifier } => (
            StatusCode::NOT_FOUND,
            "not_found",
            format!("{entity} '{identifier}' not found"),
        ),
        ServiceError::AlreadyExists { entity, identifier } => (
            StatusCode::CONFLICT,
            "already_exists",
            format!("{entity} '{identifier}' already exists"),
        ),
        error @ ServiceError::DuplicateEmail { .. } => {
            (StatusCode::BAD_REQUEST, "duplicate_email", error.to_string())
        }
        error @ ServiceError::InvalidRefreshToken => (
            StatusCode::BAD_REQUEST,
            "invalid_refresh_token",
            error.to_string(),
        ),
        ServiceError::PermissionDenied { message } => {
            (StatusCode::FORBIDDEN, "permission_denied", message)
        }
        ServiceError::InvalidOperation { message } => {
            (StatusCode::BAD_REQUEST, "invalid_operation", message)
        }
        // Internal failures are logged with their cause and answered
        // opaquely.
        ServiceError::Database { source } => {
            tracing::error!("Database error: {}", source);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "database_error",
                "Internal server error".to_string(),
            )
        }
        ServiceError::InternalError { message } => {
            tracing::error!("Internal error: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error".to_string(),
            )
        }
    };

    let body = ApiResponse::<()>::error(message, error_type, None);
    (status, serde_json::to_string(&body).unwrap())
}

/// Expands `validator::ValidationErrors` into one entry per failed field.
pub fn validation_errors_to_field_errors(errors: validator::ValidationErrors) -> Vec<FieldError> {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .unwrap_or(&"Invalid value".into())
                    .to_string(),
            })
        })
        .collect()
}

/// Flattens `validator::ValidationErrors` into a single message string.
pub fn validation_errors_to_message(errors: validator::ValidationErrors) -> String {
    validation_errors_to_field_errors(errors)
        .into_iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_meta_calculation() {
        let meta = PaginationMeta::new(2, 10, 25);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(meta.has_prev);

        let first = PaginationMeta::new(1, 10, 25);
        assert!(first.has_next);
        assert!(!first.has_prev);

        let last = PaginationMeta::new(3, 10, 25);
        assert!(!last.has_next);
        assert!(last.has_prev);

        // Exact multiple does not produce a trailing empty page.
        let exact = PaginationMeta::new(2, 10, 20);
        assert_eq!(exact.total_pages, 2);
        assert!(!exact.has_next);

        let empty = PaginationMeta::new(1, 10, 0);
        assert_eq!(empty.total_pages, 1);
        assert!(!empty.has_next);
        assert!(!empty.has_prev);
    }

    #[test]
    fn test_pagination_filter_defaults_and_offsets() {
        let filter = PaginationFilter {
            page: Some(3),
            per_page: Some(25),
        };
        assert_eq!(filter.offset(), 50);
        assert_eq!(filter.limit(), 25);

        let defaults = PaginationFilter {
            page: None,
            per_page: None,
        };
        assert_eq!(defaults.page(), 1);
        assert_eq!(defaults.per_page(), 10);
        assert_eq!(defaults.offset(), 0);
    }
}
