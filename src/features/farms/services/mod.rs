mod farm_service;

pub use farm_service::FarmService;
