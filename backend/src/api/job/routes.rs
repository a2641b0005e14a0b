//! Defines the HTTP routes for job postings.

use super::handlers::*;
use axum::{
    Router,
    routing::{get, post},
};

pub fn job_router() -> Router {
    Router::new()
        .route("/", post(create_job).get(get_jobs))
        .route(
            "/{id}",
            get(get_job_by_id).patch(update_job).delete(delete_job),
        )
}
