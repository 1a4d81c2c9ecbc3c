use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::locations::handlers;
use crate::features::locations::services::LocationService;

/// Create routes for the locations feature
pub fn routes(service: Arc<LocationService>) -> Router {
    Router::new()
        .route("/api/locations", get(handlers::get_reference_tables))
        // Province routes
        .route("/api/locations/provinces", get(handlers::list_provinces))
        .route("/api/locations/provinces/{id}", get(handlers::get_province))
        .route(
            "/api/locations/provinces/{id}/municipalities",
            get(handlers::list_municipalities_by_province),
        )
        // Municipality routes
        .route(
            "/api/locations/municipalities/{id}",
            get(handlers::get_municipality),
        )
        .route(
            "/api/locations/municipalities/{id}/barangays",
            get(handlers::list_barangays_by_municipality),
        )
        // Barangay routes
        .route("/api/locations/barangays/{id}", get(handlers::get_barangay))
        .with_state(service)
}
