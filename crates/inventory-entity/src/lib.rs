//! # inventory-entity
//!
//! Domain entity models for the inventory catalog: categories, products,
//! and the roles that gate access to them.

pub mod category;
pub mod product;
pub mod user;
