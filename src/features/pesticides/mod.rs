//! Pesticide catalogue with supplier locations.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/pesticides` | Paginated list (`search`, `toxicity`) |
//! | POST | `/api/pesticides` | Create pesticide |
//! | GET | `/api/pesticides/{id}` | Get pesticide |
//! | PUT | `/api/pesticides/{id}` | Update pesticide |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::PesticideService;
