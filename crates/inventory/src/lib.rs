//! Inventory domain module.
//!
//! Stock levels, their classification, and the catalog stock filters,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod stock;

pub use stock::{StockFilter, StockLevel, StockStatus};
