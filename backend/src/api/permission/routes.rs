//! Defines the HTTP routes for permission management.

use super::handlers::*;
use axum::{
    Router,
    routing::{get, post},
};

pub fn permission_router() -> Router {
    Router::new()
        .route("/", post(create_permission).get(get_permissions))
        .route(
            "/{id}",
            get(get_permission_by_id)
                .patch(update_permission)
                .delete(delete_permission),
        )
}
