//! Inventory
//!
//! Per-size stock counters. The conditional decrement is the only operation
//! allowed to authorize taking stock.

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::InventoryServiceError;
pub use service::*;
