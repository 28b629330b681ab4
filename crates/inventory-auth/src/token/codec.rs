//! Token signing and verification.
//!
//! Tokens are HS256 JWTs carrying only `sub`, `iat` and `exp`. The
//! signature is always checked before any decoded field is trusted, so a
//! forged token with a far-future `exp` is reported as forged, never as
//! valid or expired.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use inventory_core::config::AuthConfig;
use inventory_core::error::AppError;
use inventory_core::traits::Clock;

use super::claims::Claims;
use super::key::SigningKey;
use crate::identity::{Identity, RoleLookup};

/// Why a presented token was not accepted.
///
/// The distinction is for diagnostics only; callers see a single generic
/// rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenRejection {
    /// The text is not a structurally valid token.
    #[error("token is malformed")]
    Malformed,
    /// The signature does not verify against the signing key.
    #[error("token signature does not verify")]
    Forged,
    /// The current time is at or past the token's expiry.
    #[error("token has expired")]
    Expired,
    /// The token names a different subject than expected.
    #[error("token subject does not match the expected subject")]
    SubjectMismatch,
    /// The token's subject has no account.
    #[error("token subject is not a known account")]
    UnknownSubject,
}

/// A freshly signed token and its validity window.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    /// Encoded token text, sent as `Authorization: Bearer <token>`.
    pub token: String,
    /// Subject the token was issued to.
    pub subject: String,
    /// Issue instant (whole seconds).
    pub issued_at: DateTime<Utc>,
    /// First instant at which the token is no longer valid.
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies bearer tokens.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("ttl", &self.ttl)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Create a codec signing with `key` and issuing tokens valid for `ttl`.
    pub fn new(key: &SigningKey, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the injected clock after the signature.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Self {
            encoding_key: key.encoding_key(),
            decoding_key: key.decoding_key(),
            validation,
            ttl,
            clock,
        }
    }

    /// Build a codec from the `[auth]` configuration section.
    pub fn from_config(config: &AuthConfig, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        let key = SigningKey::new(config.jwt_secret.as_bytes())?;
        if config.token_ttl_minutes == 0 {
            return Err(AppError::configuration(
                "auth.token_ttl_minutes must be greater than zero",
            ));
        }
        let minutes = i64::try_from(config.token_ttl_minutes)
            .map_err(|_| AppError::configuration("auth.token_ttl_minutes is too large"))?;
        Ok(Self::new(&key, Duration::minutes(minutes), clock))
    }

    /// Sign a token for `subject`, valid from now until now + ttl.
    pub fn issue(&self, subject: &str) -> Result<IssuedToken, AppError> {
        let now = self.clock.now();
        let issued_at = DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now);
        let expires_at = issued_at + self.ttl;

        let claims = Claims {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))?;

        debug!(subject = %subject, expires_at = %expires_at, "Issued token");

        Ok(IssuedToken {
            token,
            subject: subject.to_string(),
            issued_at,
            expires_at,
        })
    }

    /// Verify `token` for `expected_subject` and resolve the caller's identity.
    ///
    /// Checks, in order: structure, signature, expiry, subject, and that the
    /// subject still has an account.
    pub fn verify(
        &self,
        token: &str,
        expected_subject: &str,
        roles: &dyn RoleLookup,
    ) -> Result<Identity, TokenRejection> {
        let claims = self.decode_signed(token)?;

        if claims.is_expired_at(self.clock.now()) {
            return Err(TokenRejection::Expired);
        }
        if claims.sub != expected_subject {
            return Err(TokenRejection::SubjectMismatch);
        }

        let granted = roles
            .roles_for(&claims.sub)
            .ok_or(TokenRejection::UnknownSubject)?;
        Ok(Identity::new(claims.sub, granted))
    }

    /// Structural decode and signature check only; no expiry or subject check.
    pub fn extract_subject(&self, token: &str) -> Result<String, TokenRejection> {
        self.decode_signed(token).map(|claims| claims.sub)
    }

    fn decode_signed(&self, token: &str) -> Result<Claims, TokenRejection> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::InvalidSignature | JwtErrorKind::InvalidAlgorithm => {
                    TokenRejection::Forged
                }
                JwtErrorKind::ExpiredSignature => TokenRejection::Expired,
                _ => TokenRejection::Malformed,
            })
    }
}
