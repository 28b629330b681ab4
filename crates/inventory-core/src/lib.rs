//! # inventory-core
//!
//! Core crate for the inventory catalog. Contains configuration schemas,
//! the clock and repository traits, pagination/sorting types, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other inventory crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
