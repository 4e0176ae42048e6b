//! Auth Config

use clap::Args;

/// Access token verification settings.
#[derive(Args)]
pub struct AuthConfig {
    /// Shared secret the identity service signs access tokens with (HS256)
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}
