//! Products
//!
//! Read-side access to the catalog, plus product creation for seeding.

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::ProductsServiceError;
pub use service::*;
