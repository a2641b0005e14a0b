//! Defines the HTTP routes for user management.

use super::handlers::*;
use axum::{
    Router,
    routing::{get, post},
};

pub fn user_router() -> Router {
    Router::new()
        .route("/", post(create_user).get(get_users))
        .route(
            "/{id}",
            get(get_user_by_id).patch(update_user).delete(delete_user),
        )
}
