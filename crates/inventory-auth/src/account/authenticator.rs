//! Credential verification and token issuance for `POST /auth/login`.

use std::sync::Arc;

use tracing::{debug, info};

use inventory_core::error::AppError;

use super::directory::AccountDirectory;
use crate::password::PasswordHasher;
use crate::token::{IssuedToken, TokenCodec};

/// Password used to build the decoy hash verified for unknown usernames.
const DECOY_PASSWORD: &str = "decoy-password-never-matches";

/// Exchanges a username and password for a signed token.
#[derive(Debug, Clone)]
pub struct LoginAuthenticator {
    directory: Arc<AccountDirectory>,
    hasher: PasswordHasher,
    codec: Arc<TokenCodec>,
    decoy_hash: String,
}

impl LoginAuthenticator {
    /// Create an authenticator. Hashes a decoy password once up front.
    pub fn new(
        directory: Arc<AccountDirectory>,
        hasher: PasswordHasher,
        codec: Arc<TokenCodec>,
    ) -> Result<Self, AppError> {
        let decoy_hash = hasher.hash_password(DECOY_PASSWORD)?;
        Ok(Self {
            directory,
            hasher,
            codec,
            decoy_hash,
        })
    }

    /// Verify the credential and issue a token for the account.
    ///
    /// An unknown username and a wrong password produce the same error, and
    /// both cost one hash verification.
    pub fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AppError> {
        let verified = match self.directory.find(username) {
            Some(account) => self
                .hasher
                .verify_password(password, &account.password_hash)?,
            None => {
                self.hasher.verify_password(password, &self.decoy_hash)?;
                false
            }
        };

        if !verified {
            debug!(username = %username, "Login rejected");
            return Err(invalid_credentials());
        }

        let issued = self.codec.issue(username)?;
        info!(username = %username, expires_at = %issued.expires_at, "Login succeeded");
        Ok(issued)
    }
}

fn invalid_credentials() -> AppError {
    AppError::authentication("Invalid username or password")
}
