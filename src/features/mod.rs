pub mod farmers;
pub mod farms;
pub mod locations;
pub mod pesticides;
pub mod registrations;
