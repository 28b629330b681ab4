//! Core traits defined in `inventory-core` and implemented by other crates.

pub mod clock;
pub mod repository;

pub use clock::{Clock, ManualClock, SystemClock};
pub use repository::{Versioned, VersionedRepository};
