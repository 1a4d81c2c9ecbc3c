mod farmer_dto;

pub use farmer_dto::*;
