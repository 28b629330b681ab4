//! In-memory repositories.

pub mod category;
pub mod product;
pub mod table;

pub use category::MemoryCategoryRepository;
pub use product::MemoryProductRepository;
pub use table::MemoryTable;
