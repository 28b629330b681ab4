//! Account roles.

pub mod role;

pub use role::Role;
