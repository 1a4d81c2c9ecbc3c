//! Farmer + farm registration wizard endpoint.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/registrations` | Create a farmer and their farm atomically |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::RegistrationService;
