//! In-memory account directory loaded from configuration.

use std::collections::{BTreeSet, HashMap};

use tracing::info;

use inventory_core::config::AccountConfig;
use inventory_core::error::AppError;
use inventory_entity::user::Role;

use crate::password::hasher::parse_hash;
use crate::identity::RoleLookup;

/// A login account.
#[derive(Clone)]
pub struct Account {
    /// Login name, matched exactly.
    pub username: String,
    /// Argon2id PHC hash of the password.
    pub password_hash: String,
    /// Roles granted to the account.
    pub roles: BTreeSet<Role>,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("username", &self.username)
            .field("roles", &self.roles)
            .finish_non_exhaustive()
    }
}

/// Read-only set of accounts, keyed by username.
#[derive(Debug, Clone, Default)]
pub struct AccountDirectory {
    accounts: HashMap<String, Account>,
}

impl AccountDirectory {
    /// Build the directory from `[[auth.accounts]]` entries.
    ///
    /// Fails on duplicate usernames, unknown role names, or a password hash
    /// that is not a PHC string.
    pub fn from_config(entries: &[AccountConfig]) -> Result<Self, AppError> {
        let mut accounts = HashMap::with_capacity(entries.len());

        for entry in entries {
            if entry.username.trim().is_empty() {
                return Err(AppError::configuration("Account username must not be blank"));
            }
            parse_hash(&entry.password_hash).map_err(|e| {
                AppError::configuration(format!(
                    "Account '{}' has an invalid password_hash: {}",
                    entry.username, e.message
                ))
            })?;
            let roles = entry
                .roles
                .iter()
                .map(|r| r.parse::<Role>())
                .collect::<Result<BTreeSet<_>, _>>()
                .map_err(|e| {
                    AppError::configuration(format!("Account '{}': {e}", entry.username))
                })?;

            let account = Account {
                username: entry.username.clone(),
                password_hash: entry.password_hash.clone(),
                roles,
            };
            if accounts.insert(entry.username.clone(), account).is_some() {
                return Err(AppError::configuration(format!(
                    "Duplicate account username: '{}'",
                    entry.username
                )));
            }
        }

        info!(count = accounts.len(), "Loaded account directory");
        Ok(Self { accounts })
    }

    /// Build a directory directly from accounts.
    pub fn from_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        Self {
            accounts: accounts
                .into_iter()
                .map(|a| (a.username.clone(), a))
                .collect(),
        }
    }

    /// Look up an account by username.
    pub fn find(&self, username: &str) -> Option<&Account> {
        self.accounts.get(username)
    }

    /// Number of accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the directory has no accounts.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl RoleLookup for AccountDirectory {
    fn roles_for(&self, subject: &str) -> Option<BTreeSet<Role>> {
        self.find(subject).map(|a| a.roles.clone())
    }
}
