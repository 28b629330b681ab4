//! # inventory-database
//!
//! Persistence for the inventory catalog. Every repository exposes the
//! atomic "compare stored version, then write and increment" primitive
//! that optimistic concurrency relies on.
//!
//! - `memory`: process-local tables backed by `DashMap`
//! - `repositories`: PostgreSQL repositories backed by sqlx
//! - `store`: provider dispatch selected from configuration

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{CatalogStores, CategoryRepository, ProductRepository};
