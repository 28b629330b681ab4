//! The ordered (method, path, roles) rule table.
//!
//! Rules are evaluated top to bottom and the first rule whose method class
//! and path pattern match decides. The last rule matches every request, so
//! the table is total.

use std::collections::BTreeSet;

use http::Method;

use inventory_entity::user::Role;

/// Outcome of a policy decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// The request may proceed.
    Allow,
    /// The request must be refused.
    Deny,
}

impl Decision {
    /// Returns `true` for [`Decision::Allow`].
    pub fn is_allowed(self) -> bool {
        self == Self::Allow
    }
}

/// Which HTTP methods a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodClass {
    /// `GET` and `HEAD`.
    Read,
    /// `POST`, `PUT` and `DELETE`.
    Write,
    /// Every method.
    Any,
}

impl MethodClass {
    /// Whether `method` belongs to this class.
    pub fn matches(self, method: &Method) -> bool {
        match self {
            Self::Read => *method == Method::GET || *method == Method::HEAD,
            Self::Write => {
                *method == Method::POST || *method == Method::PUT || *method == Method::DELETE
            }
            Self::Any => true,
        }
    }
}

/// What a matching rule demands of the caller's roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// No identity needed.
    Public,
    /// Any identity holding at least one role.
    Authenticated,
    /// An identity holding this role.
    Role(Role),
}

impl Requirement {
    fn decide(self, roles: &BTreeSet<Role>) -> Decision {
        let allowed = match self {
            Self::Public => true,
            Self::Authenticated => !roles.is_empty(),
            Self::Role(role) => roles.contains(&role),
        };
        if allowed {
            Decision::Allow
        } else {
            Decision::Deny
        }
    }
}

/// One row of the rule table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Methods the rule applies to.
    pub methods: MethodClass,
    /// Path patterns. `/x/**` matches `/x` and everything below it.
    pub paths: &'static [&'static str],
    /// What the rule demands.
    pub requirement: Requirement,
}

impl Rule {
    /// Whether the rule applies to this request.
    pub fn matches(&self, method: &Method, path: &str) -> bool {
        self.methods.matches(method) && self.paths.iter().any(|p| path_matches(p, path))
    }
}

/// Login and API documentation.
pub const PUBLIC_PATHS: &[&str] = &[
    "/auth/**",
    "/api-docs/**",
    "/v3/api-docs/**",
    "/swagger-ui/**",
    "/swagger-ui.html",
];

/// Category and product resources.
pub const CATALOG_PATHS: &[&str] = &["/categories/**", "/products/**"];

/// The default rule table.
pub const DEFAULT_RULES: &[Rule] = &[
    Rule {
        methods: MethodClass::Any,
        paths: PUBLIC_PATHS,
        requirement: Requirement::Public,
    },
    Rule {
        methods: MethodClass::Read,
        paths: CATALOG_PATHS,
        requirement: Requirement::Authenticated,
    },
    Rule {
        methods: MethodClass::Write,
        paths: CATALOG_PATHS,
        requirement: Requirement::Role(Role::ELEVATED),
    },
    Rule {
        methods: MethodClass::Any,
        paths: &["/**"],
        requirement: Requirement::Authenticated,
    },
];

fn path_matches(pattern: &str, path: &str) -> bool {
    match pattern.strip_suffix("/**") {
        Some("") => true,
        Some(prefix) => {
            path == prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        }
        None => path == pattern,
    }
}

/// Maps (method, path, roles) to [`Decision`].
///
/// Pure: no I/O and no state beyond the immutable rule table.
#[derive(Debug, Clone, Copy)]
pub struct AccessPolicy {
    rules: &'static [Rule],
}

impl AccessPolicy {
    /// Policy over [`DEFAULT_RULES`].
    pub fn new() -> Self {
        Self {
            rules: DEFAULT_RULES,
        }
    }

    /// The rule table in evaluation order.
    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    /// Decide whether a caller holding `roles` may issue `method path`.
    pub fn decide(&self, method: &Method, path: &str, roles: &BTreeSet<Role>) -> Decision {
        self.rules
            .iter()
            .find(|rule| rule.matches(method, path))
            .map_or(Decision::Deny, |rule| rule.requirement.decide(roles))
    }

    /// Whether `path` is reachable without any credential.
    pub fn is_public_path(&self, path: &str) -> bool {
        PUBLIC_PATHS.iter().any(|p| path_matches(p, path))
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new()
    }
}
