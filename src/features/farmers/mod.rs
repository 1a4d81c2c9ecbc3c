//! Farmer registry.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/farmers` | Paginated list (`search`, `province_id`) |
//! | POST | `/api/farmers` | Create farmer |
//! | GET | `/api/farmers/{id}` | Get farmer |
//! | PUT | `/api/farmers/{id}` | Update farmer |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::FarmerService;
