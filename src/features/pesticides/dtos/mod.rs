mod pesticide_dto;

pub use pesticide_dto::*;
