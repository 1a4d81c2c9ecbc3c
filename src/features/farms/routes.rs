use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::farms::handlers;
use crate::features::farms::services::FarmService;

/// Create routes for the farms feature
pub fn routes(service: Arc<FarmService>) -> Router {
    Router::new()
        .route("/api/farms", get(handlers::list_farms).post(handlers::create_farm))
        .route(
            "/api/farms/{id}",
            get(handlers::get_farm).put(handlers::update_farm),
        )
        .with_state(service)
}
