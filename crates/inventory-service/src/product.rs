//! Product use cases.

use std::sync::Arc;

use tracing::info;

use inventory_core::error::AppError;
use inventory_core::types::{PageRequest, PageResponse, SortField};
use inventory_database::{CategoryRepository, ProductRepository};
use inventory_entity::product::{Product, ProductDraft, SORTABLE_FIELDS};

use crate::context::RequestContext;
use crate::guard::{ConcurrencyGuard, Mutation, Target};

/// Lists, reads, and mutates products.
#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl std::fmt::Debug for ProductService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductService").finish_non_exhaustive()
    }
}

impl ProductService {
    /// Creates a new product service.
    pub fn new(
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            products,
            categories,
        }
    }

    /// Lists products.
    pub async fn list(
        &self,
        page: &PageRequest,
        sort: &SortField,
    ) -> Result<PageResponse<Product>, AppError> {
        sort.ensure_one_of(SORTABLE_FIELDS)?;
        self.products.find_all(page, sort).await
    }

    /// Gets a product by id.
    pub async fn get(&self, id: i64) -> Result<Product, AppError> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product not found with id: {id}")))
    }

    /// Creates a product in an existing category. A supplied version is a conflict.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: Mutation<ProductDraft>,
    ) -> Result<Product, AppError> {
        ConcurrencyGuard::ensure(req.version, Target::Create, "product")?;
        self.ensure_category(req.draft.category_id).await?;

        let product = self.products.create(&req.draft).await?;
        info!(
            actor = %ctx.subject,
            product_id = product.id,
            category_id = product.category_id,
            "Product created"
        );
        Ok(product)
    }

    /// Replaces a product's fields.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        req: Mutation<ProductDraft>,
    ) -> Result<Product, AppError> {
        let current = self.get(id).await?;
        ConcurrencyGuard::ensure(
            req.version,
            Target::Update {
                stored_version: current.version,
            },
            "product",
        )?;
        self.ensure_category(req.draft.category_id).await?;

        let product = self
            .products
            .update_if_version(id, current.version, &req.draft)
            .await?;
        info!(
            actor = %ctx.subject,
            product_id = id,
            version = product.version,
            "Product updated"
        );
        Ok(product)
    }

    /// Deletes a product.
    pub async fn delete(&self, ctx: &RequestContext, id: i64) -> Result<(), AppError> {
        if !self.products.delete(id).await? {
            return Err(AppError::not_found(format!(
                "Product not found with id: {id}"
            )));
        }
        info!(actor = %ctx.subject, product_id = id, "Product deleted");
        Ok(())
    }

    async fn ensure_category(&self, category_id: i64) -> Result<(), AppError> {
        if self.categories.exists(category_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(format!(
                "Category not found with id: {category_id}"
            )))
        }
    }
}
