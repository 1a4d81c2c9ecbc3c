use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Router};

use crate::features::farmers::{routes as farmers_routes, FarmerService};
use crate::features::farms::{routes as farms_routes, FarmService};
use crate::features::locations::{routes as locations_routes, LocationService};
use crate::features::pesticides::{routes as pesticides_routes, PesticideService};
use crate::features::registrations::{routes as registrations_routes, RegistrationService};

/// Feature services shared by the API routes
#[derive(Clone)]
pub struct Services {
    pub locations: Arc<LocationService>,
    pub farmers: Arc<FarmerService>,
    pub farms: Arc<FarmService>,
    pub pesticides: Arc<PesticideService>,
    pub registrations: Arc<RegistrationService>,
}

impl Services {
    /// Wire every feature service on top of the location reference data
    pub fn new(locations: Arc<LocationService>) -> Self {
        let farmers = Arc::new(FarmerService::new(Arc::clone(&locations)));
        let farms = Arc::new(FarmService::new(
            Arc::clone(&farmers),
            Arc::clone(&locations),
        ));
        let pesticides = Arc::new(PesticideService::new(Arc::clone(&locations)));
        let registrations = Arc::new(RegistrationService::new(
            Arc::clone(&farmers),
            Arc::clone(&farms),
        ));

        Self {
            locations,
            farmers,
            farms,
            pesticides,
            registrations,
        }
    }
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// All API routes plus `/health`, without the HTTP layers
pub fn api_routes(services: &Services) -> Router {
    Router::new()
        .merge(locations_routes::routes(Arc::clone(&services.locations)))
        .merge(farmers_routes::routes(Arc::clone(&services.farmers)))
        .merge(farms_routes::routes(Arc::clone(&services.farms)))
        .merge(pesticides_routes::routes(Arc::clone(&services.pesticides)))
        .merge(registrations_routes::routes(Arc::clone(
            &services.registrations,
        )))
        .route("/health", get(health_check))
}
