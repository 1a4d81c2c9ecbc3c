mod farm_dto;

pub use farm_dto::*;
