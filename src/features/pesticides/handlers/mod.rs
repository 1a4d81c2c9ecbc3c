mod pesticide_handler;

pub use pesticide_handler::*;
