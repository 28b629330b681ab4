//! Turns an inbound request's `Authorization` header into an admission result.
//!
//! ```text
//! Unauthenticated ──no credential, public path──▶ Anonymous
//!        │         ──no credential, otherwise───▶ Rejected(MissingCredential)
//!        ▼
//!   Extracting ──extract_subject fails──▶ Rejected(reason)
//!        ▼
//!   Verifying ──verify fails──▶ Rejected(reason)
//!        ▼
//!  Authenticated(identity)
//! ```

use std::sync::Arc;

use http::HeaderMap;
use http::header::AUTHORIZATION;
use thiserror::Error;
use tracing::debug;

use inventory_core::error::AppError;

use crate::identity::{Identity, RoleLookup};
use crate::policy::AccessPolicy;
use crate::token::{TokenCodec, TokenRejection};

/// Message returned to every caller the gate turns away.
pub const UNAUTHENTICATED_MESSAGE: &str = "Full authentication is required to access this resource";

/// Why the gate refused a request. Logged, never returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateRejection {
    /// No bearer credential on a protected path.
    #[error("no bearer credential presented")]
    MissingCredential,
    /// The presented token failed verification.
    #[error(transparent)]
    Token(#[from] TokenRejection),
}

impl From<GateRejection> for AppError {
    fn from(_: GateRejection) -> Self {
        AppError::authentication(UNAUTHENTICATED_MESSAGE)
    }
}

/// Terminal states of the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Public path without a credential; proceeds with no identity.
    Anonymous,
    /// The token verified; the identity is attached to the request.
    Authenticated(Identity),
    /// The request is refused with a generic 401.
    Rejected(GateRejection),
}

/// Extracts the bearer token from `Authorization: Bearer <token>`.
///
/// The scheme is matched case-insensitively. Any other scheme, a
/// non-ASCII header, or an empty token counts as no credential.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Authenticates requests using the token codec and the role lookup.
#[derive(Clone)]
pub struct AuthenticationGate {
    codec: Arc<TokenCodec>,
    roles: Arc<dyn RoleLookup>,
    policy: AccessPolicy,
}

impl std::fmt::Debug for AuthenticationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationGate")
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}

impl AuthenticationGate {
    /// Create a gate.
    pub fn new(codec: Arc<TokenCodec>, roles: Arc<dyn RoleLookup>, policy: AccessPolicy) -> Self {
        Self {
            codec,
            roles,
            policy,
        }
    }

    /// Decide the admission state of a request.
    pub fn admit(&self, headers: &HeaderMap, path: &str) -> Admission {
        let Some(token) = bearer_token(headers) else {
            if self.policy.is_public_path(path) {
                return Admission::Anonymous;
            }
            return self.reject(path, GateRejection::MissingCredential);
        };

        let subject = match self.codec.extract_subject(token) {
            Ok(subject) => subject,
            Err(reason) => return self.reject(path, reason.into()),
        };

        match self.codec.verify(token, &subject, self.roles.as_ref()) {
            Ok(identity) => Admission::Authenticated(identity),
            Err(reason) => self.reject(path, reason.into()),
        }
    }

    fn reject(&self, path: &str, reason: GateRejection) -> Admission {
        debug!(path = %path, reason = %reason, "Request rejected by authentication gate");
        Admission::Rejected(reason)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashMap};

    use chrono::{DateTime, Duration};
    use http::HeaderValue;
    use inventory_core::traits::ManualClock;
    use inventory_entity::user::Role;

    use super::*;
    use crate::token::SigningKey;

    struct Roles(HashMap<&'static str, BTreeSet<Role>>);

    impl RoleLookup for Roles {
        fn roles_for(&self, subject: &str) -> Option<BTreeSet<Role>> {
            self.0.get(subject).cloned()
        }
    }

    fn fixture() -> (AuthenticationGate, Arc<TokenCodec>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        ));
        let key = SigningKey::new("gate-test-signing-key-0123456789abcdef").unwrap();
        let codec = Arc::new(TokenCodec::new(&key, Duration::minutes(5), clock.clone()));
        let roles = Roles(HashMap::from([("alice", BTreeSet::from([Role::Full]))]));
        let gate = AuthenticationGate::new(codec.clone(), Arc::new(roles), AccessPolicy::new());
        (gate, codec, clock)
    }

    fn with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&with_auth("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(bearer_token(&with_auth("bearer xyz")), Some("xyz"));
        assert_eq!(bearer_token(&with_auth("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&with_auth("Bearer ")), None);
        assert_eq!(bearer_token(&with_auth("Bearer")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_no_credential_on_public_path_is_anonymous() {
        let (gate, _, _) = fixture();
        assert_eq!(gate.admit(&HeaderMap::new(), "/auth/login"), Admission::Anonymous);
        assert_eq!(
            gate.admit(&with_auth("Basic abc"), "/api-docs/openapi.json"),
            Admission::Anonymous
        );
    }

    #[test]
    fn test_no_credential_on_protected_path_is_rejected() {
        let (gate, _, _) = fixture();
        assert_eq!(
            gate.admit(&HeaderMap::new(), "/products"),
            Admission::Rejected(GateRejection::MissingCredential)
        );
    }

    #[test]
    fn test_valid_token_authenticates() {
        let (gate, codec, _) = fixture();
        let token = codec.issue("alice").unwrap().token;
        match gate.admit(&with_auth(&format!("Bearer {token}")), "/products") {
            Admission::Authenticated(identity) => {
                assert_eq!(identity.subject, "alice");
                assert!(identity.is_elevated());
            }
            other => panic!("expected authenticated, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_tokens_are_rejected_with_reason() {
        let (gate, codec, clock) = fixture();
        assert_eq!(
            gate.admit(&with_auth("Bearer not-a-token"), "/categories"),
            Admission::Rejected(GateRejection::Token(TokenRejection::Malformed))
        );

        let stranger = codec.issue("mallory").unwrap().token;
        assert_eq!(
            gate.admit(&with_auth(&format!("Bearer {stranger}")), "/categories"),
            Admission::Rejected(GateRejection::Token(TokenRejection::UnknownSubject))
        );

        let token = codec.issue("alice").unwrap().token;
        clock.advance(Duration::minutes(5));
        assert_eq!(
            gate.admit(&with_auth(&format!("Bearer {token}")), "/categories"),
            Admission::Rejected(GateRejection::Token(TokenRejection::Expired))
        );
    }

    #[test]
    fn test_invalid_token_on_public_path_is_rejected() {
        let (gate, _, _) = fixture();
        assert_eq!(
            gate.admit(&with_auth("Bearer garbage"), "/auth/login"),
            Admission::Rejected(GateRejection::Token(TokenRejection::Malformed))
        );
    }

    #[test]
    fn test_rejection_maps_to_generic_error() {
        let a: AppError = GateRejection::MissingCredential.into();
        let b: AppError = GateRejection::Token(TokenRejection::Forged).into();
        assert_eq!(a.message, b.message);
        assert_eq!(a.kind, b.kind);
    }
}
