//! HTTP handler functions organized by resource.

pub mod auth;
pub mod category;
pub mod docs;
pub mod product;
