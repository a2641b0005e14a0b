//! Defines the HTTP routes for résumé management.

use super::handlers::*;
use axum::{
    Router,
    routing::{get, post},
};

pub fn resume_router() -> Router {
    Router::new()
        .route("/", post(create_resume).get(get_resumes))
        .route("/by-user", post(get_resumes_by_user))
        .route(
            "/{id}",
            get(get_resume_by_id)
                .patch(update_resume_status)
                .delete(delete_resume),
        )
}
