//! Configured accounts and the credential-for-token exchange.

pub mod authenticator;
pub mod directory;

pub use authenticator::LoginAuthenticator;
pub use directory::{Account, AccountDirectory};
