//! Per-request admission.

pub mod admission;

pub use admission::{Admission, AuthenticationGate, GateRejection, bearer_token};
