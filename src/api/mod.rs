//! HTTP API module
//!
//! Local boundary a renderer uses to dispatch intents and read snapshots.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/projects", post(create_project_handler))
        .route("/projects/:project_id", delete(delete_project_handler))
        .route("/projects/:project_id/toggle", post(toggle_expanded_handler))
        .route("/projects/:project_id/timer", post(project_timer_handler))
        .route("/projects/:project_id/elements", post(create_element_handler))
        .route(
            "/projects/:project_id/elements/:element_id",
            delete(delete_element_handler),
        )
        .route(
            "/projects/:project_id/elements/:element_id/timer",
            post(element_timer_handler),
        )
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
