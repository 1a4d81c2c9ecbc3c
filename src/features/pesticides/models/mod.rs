mod pesticide;

pub use pesticide::{Pesticide, ToxicityCategory};
