mod farm;

pub use farm::Farm;
