//! # inventory-auth
//!
//! Request admission for the inventory catalog.
//!
//! ## Modules
//!
//! - `token`: signed, time-bounded bearer tokens (HS256 JWT)
//! - `password`: Argon2id password hashing
//! - `account`: configured accounts and the login exchange
//! - `gate`: per-request credential extraction and verification
//! - `policy`: the (method, path, roles) access rule table

pub mod account;
pub mod gate;
pub mod identity;
pub mod password;
pub mod policy;
pub mod token;

pub use account::{AccountDirectory, LoginAuthenticator};
pub use gate::{Admission, AuthenticationGate, GateRejection};
pub use identity::{Identity, RoleLookup};
pub use password::PasswordHasher;
pub use policy::{AccessPolicy, Decision};
pub use token::{IssuedToken, SigningKey, TokenCodec, TokenRejection};
