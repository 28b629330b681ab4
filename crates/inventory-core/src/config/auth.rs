//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Signing secret shipped in `config/default.toml` for local development.
pub const DEVELOPMENT_JWT_SECRET: &str = "dev-only-signing-secret-change-me-0123456789";

/// Authentication and credential configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256). At least 32 bytes.
    #[serde(default)]
    pub jwt_secret: String,
    /// Token lifetime in minutes.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: u64,
    /// Accounts allowed to log in.
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
}

/// A configured login account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Login name.
    pub username: String,
    /// Argon2id PHC hash of the password.
    pub password_hash: String,
    /// Role names granted to the account, e.g. `["FULL"]`.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_minutes: default_token_ttl(),
            accounts: Vec::new(),
        }
    }
}

impl AuthConfig {
    /// Whether the signing secret is still the one from `default.toml`.
    pub fn uses_development_secret(&self) -> bool {
        self.jwt_secret == DEVELOPMENT_JWT_SECRET
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_minutes", &self.token_ttl_minutes)
            .field("accounts", &self.accounts.len())
            .finish()
    }
}

fn default_token_ttl() -> u64 {
    60
}
