//! The process-wide token signing key.

use std::fmt;

use jsonwebtoken::{DecodingKey, EncodingKey};

use inventory_core::error::AppError;

/// Minimum accepted key length in bytes (HS256 block size).
pub const MIN_KEY_BYTES: usize = 32;

/// HMAC secret used to sign and verify tokens.
///
/// Loaded once at startup and injected where needed. `Debug` never prints
/// the key material.
#[derive(Clone)]
pub struct SigningKey {
    secret: Vec<u8>,
}

impl SigningKey {
    /// Wrap raw key material, rejecting keys shorter than [`MIN_KEY_BYTES`].
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, AppError> {
        let secret = secret.into();
        if secret.len() < MIN_KEY_BYTES {
            return Err(AppError::configuration(format!(
                "auth.jwt_secret must be at least {MIN_KEY_BYTES} bytes (got {})",
                secret.len()
            )));
        }
        Ok(Self { secret })
    }

    pub(crate) fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(&self.secret)
    }

    pub(crate) fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(&self.secret)
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("secret", &"<redacted>")
            .finish()
    }
}
