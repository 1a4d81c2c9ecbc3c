mod farmer;

pub use farmer::Farmer;
