use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::pesticides::handlers;
use crate::features::pesticides::services::PesticideService;

/// Create routes for the pesticides feature
pub fn routes(service: Arc<PesticideService>) -> Router {
    Router::new()
        .route(
            "/api/pesticides",
            get(handlers::list_pesticides).post(handlers::create_pesticide),
        )
        .route(
            "/api/pesticides/{id}",
            get(handlers::get_pesticide).put(handlers::update_pesticide),
        )
        .with_state(service)
}
