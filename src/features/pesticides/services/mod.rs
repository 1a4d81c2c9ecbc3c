mod pesticide_service;

pub use pesticide_service::PesticideService;
