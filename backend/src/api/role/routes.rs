//! Defines the HTTP routes for role management.

use super::handlers::*;
use axum::{
    Router,
    routing::{get, post},
};

pub fn role_router() -> Router {
    Router::new()
        .route("/", post(create_role).get(get_roles))
        .route(
            "/{id}",
            get(get_role_by_id).patch(update_role).delete(delete_role),
        )
}
