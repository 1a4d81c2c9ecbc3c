mod farm_handler;

pub use farm_handler::*;
