mod farmer_service;

pub use farmer_service::{FarmerService, LOCATION_KEY};
