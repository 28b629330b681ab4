//! The request-scoped identity established by a verified token.

use std::collections::BTreeSet;

use inventory_entity::user::Role;

/// Who is making the request, and which roles they hold.
///
/// Built once per request after token verification and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Account name the token was issued to.
    pub subject: String,
    /// Roles resolved for the subject at verification time.
    pub roles: BTreeSet<Role>,
}

impl Identity {
    /// Create an identity.
    pub fn new(subject: impl Into<String>, roles: BTreeSet<Role>) -> Self {
        Self {
            subject: subject.into(),
            roles,
        }
    }

    /// Whether the identity holds the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Whether the identity may write to the catalog.
    pub fn is_elevated(&self) -> bool {
        self.has_role(Role::ELEVATED)
    }
}

/// Resolves the roles of a token subject.
///
/// Roles are not carried inside tokens; they are looked up on every request.
pub trait RoleLookup: Send + Sync {
    /// Roles held by `subject`, or `None` if the subject is unknown.
    fn roles_for(&self, subject: &str) -> Option<BTreeSet<Role>>;
}
