//! Farms and their owners.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/farms` | Paginated list (`search`, `farmer_id`, `province_id`) |
//! | POST | `/api/farms` | Create farm |
//! | GET | `/api/farms/{id}` | Get farm |
//! | PUT | `/api/farms/{id}` | Update farm |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::FarmService;
