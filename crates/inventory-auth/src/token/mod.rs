//! Bearer token issuance and verification.

pub mod claims;
pub mod codec;
pub mod key;

pub use claims::Claims;
pub use codec::{IssuedToken, TokenCodec, TokenRejection};
pub use key::SigningKey;
