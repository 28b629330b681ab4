//! Request context carrying the authenticated caller.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use inventory_auth::Identity;
use inventory_entity::user::Role;

/// Context for the current authenticated request.
///
/// Built from the gate's [`Identity`] and passed explicitly into service
/// methods, so every operation knows who is acting.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Account name of the caller.
    pub subject: String,
    /// Roles the caller holds.
    pub roles: BTreeSet<Role>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for `identity`.
    pub fn new(identity: &Identity) -> Self {
        Self {
            subject: identity.subject.clone(),
            roles: identity.roles.clone(),
            request_time: Utc::now(),
        }
    }

    /// Context for internal callers and tests.
    pub fn system() -> Self {
        Self {
            subject: "system".to_string(),
            roles: BTreeSet::from([Role::ELEVATED]),
            request_time: Utc::now(),
        }
    }

    /// Returns whether the caller may write to the catalog.
    pub fn is_elevated(&self) -> bool {
        self.roles.contains(&Role::ELEVATED)
    }
}

impl From<&Identity> for RequestContext {
    fn from(identity: &Identity) -> Self {
        Self::new(identity)
    }
}
