//! Route access policy.

pub mod rules;

pub use rules::{AccessPolicy, Decision, MethodClass, Requirement, Rule};
