//! Modules layer - Infrastructure components
//!
//! Contains storage adapters shared by the feature services.

pub mod storage;
