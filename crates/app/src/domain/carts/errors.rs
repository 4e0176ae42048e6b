//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart item or product not found")]
    NotFound,

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("size is required")]
    MissingSize,

    #[error("size {size} is not offered for this product")]
    InvalidVariant { size: String },

    #[error("only {available} in stock for size {size}, {requested} requested")]
    InsufficientStock {
        size: String,
        available: u32,
        requested: u32,
    },

    #[error("an active cart already exists")]
    AlreadyExists,

    #[error("active cart could not be resolved")]
    ActiveCartUnavailable,

    #[error("invalid reference")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
