//! Defines the HTTP routes for company management.

use super::handlers::*;
use axum::{
    Router,
    routing::{get, post},
};

pub fn company_router() -> Router {
    Router::new()
        .route("/", post(create_company).get(get_companies))
        .route(
            "/{id}",
            get(get_company_by_id)
                .patch(update_company)
                .delete(delete_company),
        )
}
