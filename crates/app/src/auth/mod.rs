//! Authentication
//!
//! Tokens are issued by the identity service; this module only verifies them
//! and turns them into a [`Requester`].

mod errors;
mod models;
mod service;

pub use errors::*;
pub use models::*;
pub use service::*;
