//! # inventory-service
//!
//! Business logic for the inventory catalog. Services receive their
//! repositories at construction time and an explicit [`RequestContext`]
//! on every mutating call.
//!
//! Every write runs the [`ConcurrencyGuard`] before touching storage and is
//! then saved through the repository's atomic compare-and-increment.

pub mod category;
pub mod context;
pub mod guard;
pub mod product;

pub use category::CategoryService;
pub use context::RequestContext;
pub use guard::{ConcurrencyGuard, Mutation, Target, Verdict};
pub use product::ProductService;
