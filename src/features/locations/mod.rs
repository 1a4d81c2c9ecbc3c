//! Philippine location reference data (province / municipality / barangay).
//!
//! Every entity form picks its address from these tables through a cascading
//! select, so the API serves both the full tables (for client-side filtering)
//! and scoped lists.
//!
//! ## Data Hierarchy
//!
//! - Level 1: Provinces, tagged with their region code
//! - Level 2: Municipalities / component cities, each in exactly one province
//! - Level 3: Barangays, each in exactly one municipality
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/locations` | Full reference tables |
//! | GET | `/api/locations/provinces` | List provinces |
//! | GET | `/api/locations/provinces/{id}` | Get province |
//! | GET | `/api/locations/provinces/{id}/municipalities` | List municipalities in a province |
//! | GET | `/api/locations/municipalities/{id}` | Get municipality |
//! | GET | `/api/locations/municipalities/{id}/barangays` | List barangays in a municipality |
//! | GET | `/api/locations/barangays/{id}` | Get barangay |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::LocationService;
