//! Category domain entities.

pub mod model;

pub use model::{Category, CategoryDraft, SORTABLE_FIELDS};
