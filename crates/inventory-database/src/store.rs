//! Repository traits for the catalog and the provider dispatch that builds them.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use inventory_core::config::{DatabaseConfig, StoreProvider};
use inventory_core::result::AppResult;
use inventory_core::traits::VersionedRepository;
use inventory_entity::category::{Category, CategoryDraft};
use inventory_entity::product::{Product, ProductDraft};

use crate::connection::DatabasePool;
use crate::memory::{MemoryCategoryRepository, MemoryProductRepository};
use crate::migration::run_migrations;
use crate::repositories::{PgCategoryRepository, PgProductRepository};

/// Category persistence.
pub trait CategoryRepository: VersionedRepository<Category, CategoryDraft> {}

impl<T> CategoryRepository for T where T: VersionedRepository<Category, CategoryDraft> {}

/// Product persistence.
#[async_trait]
pub trait ProductRepository: VersionedRepository<Product, ProductDraft> {
    /// Number of products that reference the given category.
    async fn count_by_category(&self, category_id: i64) -> AppResult<u64>;
}

/// The repositories backing the catalog, built for the configured provider.
#[derive(Clone)]
pub struct CatalogStores {
    /// Category repository.
    pub categories: Arc<dyn CategoryRepository>,
    /// Product repository.
    pub products: Arc<dyn ProductRepository>,
}

impl fmt::Debug for CatalogStores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogStores").finish_non_exhaustive()
    }
}

impl CatalogStores {
    /// Build the stores selected by `config.provider`.
    ///
    /// The PostgreSQL provider connects and runs pending migrations first.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            StoreProvider::Memory => {
                info!("Initializing in-memory catalog store");
                Ok(Self::in_memory())
            }
            StoreProvider::Postgres => {
                info!("Initializing PostgreSQL catalog store");
                let db = DatabasePool::connect(config).await?;
                run_migrations(db.pool()).await?;
                Ok(Self::postgres(db.into_pool()))
            }
        }
    }

    /// Fresh, empty in-memory stores.
    pub fn in_memory() -> Self {
        Self {
            categories: Arc::new(MemoryCategoryRepository::new()),
            products: Arc::new(MemoryProductRepository::new()),
        }
    }

    /// Stores backed by an existing PostgreSQL pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            categories: Arc::new(PgCategoryRepository::new(pool.clone())),
            products: Arc::new(PgProductRepository::new(pool)),
        }
    }
}
