//! Defines the HTTP routes for newsletter subscribers.

use super::handlers::*;
use axum::{
    Router,
    routing::{get, post},
};

pub fn subscriber_router() -> Router {
    Router::new()
        .route(
            "/",
            post(create_subscriber)
                .get(get_subscribers)
                .patch(update_subscriber),
        )
        .route("/skills", get(get_skills))
        .route("/{id}", get(get_subscriber_by_id).delete(delete_subscriber))
}
