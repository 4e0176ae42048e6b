//! Orders
//!
//! Orders are snapshots of a closed cart. Only the status changes after
//! creation.

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::OrdersServiceError;
pub use service::*;
