//! Auth service errors.

use jsonwebtoken::errors::{Error, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("token expired")]
    Expired,

    #[error("token rejected")]
    Invalid(#[source] Error),

    #[error("token does not identify a user")]
    InvalidSubject,
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        if matches!(error.kind(), ErrorKind::ExpiredSignature) {
            return Self::Expired;
        }

        Self::Invalid(error)
    }
}
