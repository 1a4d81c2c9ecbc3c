use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::farmers::handlers;
use crate::features::farmers::services::FarmerService;

/// Create routes for the farmers feature
pub fn routes(service: Arc<FarmerService>) -> Router {
    Router::new()
        .route(
            "/api/farmers",
            get(handlers::list_farmers).post(handlers::create_farmer),
        )
        .route(
            "/api/farmers/{id}",
            get(handlers::get_farmer).put(handlers::update_farmer),
        )
        .with_state(service)
}
