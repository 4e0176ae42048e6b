//! Checkout
//!
//! Turns the active cart into an order in a single transaction: stock for
//! every line is taken, the order is written, and the cart is replaced with
//! an empty one. Any failure leaves no trace.

pub mod errors;
pub mod models;
pub mod service;

pub use errors::CheckoutError;
pub use service::*;
