mod farmer_handler;

pub use farmer_handler::*;
