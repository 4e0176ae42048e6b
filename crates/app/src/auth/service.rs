//! Auth service.

use std::fmt::{self, Debug, Formatter};

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::auth::{AuthServiceError, Requester, UserId};

/// Claims carried by access tokens from the identity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub user_id: i64,

    #[serde(default)]
    pub is_admin: bool,

    pub exp: u64,
}

/// Verifies HS256 access tokens signed with a shared secret.
#[derive(Clone)]
pub struct JwtAuthService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtAuthService {
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

impl Debug for JwtAuthService {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtAuthService")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AuthService for JwtAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Requester, AuthServiceError> {
        let claims = decode::<AccessClaims>(bearer_token, &self.decoding_key, &self.validation)?
            .claims;

        if claims.user_id <= 0 {
            return Err(AuthServiceError::InvalidSubject);
        }

        Ok(Requester {
            user: UserId::from_i64(claims.user_id),
            is_admin: claims.is_admin,
        })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token into the identity making the request.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Requester, AuthServiceError>;
}
