//! Storage module for entity records
//!
//! Provides in-process tables that stand in for the persistence layer:
//! id allocation, lookup, in-place update and paginated filtered listing.

mod memory_table;

pub use memory_table::MemoryTable;
