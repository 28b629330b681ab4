//! Role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles an account can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// May create, replace, and delete catalog entries.
    Full,
    /// May read the catalog.
    Reader,
}

impl Role {
    /// The elevated role required for catalog writes.
    pub const ELEVATED: Role = Role::Full;

    /// Check if this role grants catalog writes.
    pub fn is_elevated(&self) -> bool {
        *self == Self::ELEVATED
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "FULL"),
            Self::Reader => write!(f, "READER"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    /// Accepts `FULL`/`READER` in any case, with or without a `ROLE_` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        match upper.strip_prefix("ROLE_").unwrap_or(&upper) {
            "FULL" => Ok(Self::Full),
            "READER" => Ok(Self::Reader),
            _ => Err(format!("Unknown role: '{s}'")),
        }
    }
}
