//! REST API routes.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::{estates, request_id};
use crate::state::AppState;

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    let estate_routes = Router::new()
        .route("/v1/estate", post(estates::create_estate))
        .route("/v1/estate/:id", get(estates::get_estate))
        .route("/v1/estate/:id/tree", post(estates::create_tree))
        .route("/v1/estate/:id/trees", get(estates::list_trees))
        .route("/v1/estate/:id/stats", get(estates::get_stats))
        .route("/v1/estate/:id/drone-plan", get(estates::get_drone_plan));

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(estate_routes)
        .layer(middleware::from_fn(request_id::ensure_request_id))
}
