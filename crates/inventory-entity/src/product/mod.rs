//! Product domain entities.

pub mod model;

pub use model::{Product, ProductDraft, SORTABLE_FIELDS};
