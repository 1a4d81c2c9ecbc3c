mod address;
mod barangay;
mod hierarchy;
mod municipality;
mod province;

pub use address::Address;
pub use barangay::Barangay;
pub use hierarchy::{LocationHierarchy, LocationIssue};
pub use municipality::Municipality;
pub use province::Province;
