//! In-memory product repository.

use std::cmp::Ordering;

use async_trait::async_trait;

use inventory_core::result::AppResult;
use inventory_core::traits::VersionedRepository;
use inventory_core::types::{PageRequest, PageResponse, SortDirection, SortField};
use inventory_entity::product::{Product, ProductDraft, SORTABLE_FIELDS};

use super::table::MemoryTable;
use crate::store::ProductRepository;

/// Products held in process memory.
#[derive(Debug)]
pub struct MemoryProductRepository {
    table: MemoryTable<Product>,
}

impl MemoryProductRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new("Product"),
        }
    }
}

impl Default for MemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn compare(a: &Product, b: &Product, sort: &SortField) -> Ordering {
    let ordering = match sort.field.as_str() {
        "name" => a.name.cmp(&b.name),
        "price" => a.price.total_cmp(&b.price),
        "quantity" => a.quantity.cmp(&b.quantity),
        _ => a.id.cmp(&b.id),
    };
    match sort.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

fn materialize(id: i64, version: i64, draft: &ProductDraft) -> Product {
    Product {
        id,
        name: draft.name.clone(),
        description: draft.description.clone(),
        price: draft.price,
        quantity: draft.quantity,
        version,
        category_id: draft.category_id,
    }
}

#[async_trait]
impl VersionedRepository<Product, ProductDraft> for MemoryProductRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Product>> {
        Ok(self.table.get(id))
    }

    async fn find_all(
        &self,
        page: &PageRequest,
        sort: &SortField,
    ) -> AppResult<PageResponse<Product>> {
        sort.ensure_one_of(SORTABLE_FIELDS)?;
        Ok(self.table.page(page, |a, b| compare(a, b, sort)))
    }

    async fn create(&self, draft: &ProductDraft) -> AppResult<Product> {
        Ok(self.table.insert_with(|id| materialize(id, 0, draft)))
    }

    async fn update_if_version(
        &self,
        id: i64,
        expected_version: i64,
        draft: &ProductDraft,
    ) -> AppResult<Product> {
        self.table.replace_if_version(id, expected_version, |current| {
            materialize(current.id, current.version + 1, draft)
        })
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.table.remove(id))
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn count_by_category(&self, category_id: i64) -> AppResult<u64> {
        Ok(self.table.count_where(|p| p.category_id == category_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_core::error::ErrorKind;

    fn draft(name: &str, price: f64, category_id: i64) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            description: None,
            price,
            quantity: 1,
            category_id,
        }
    }

    #[tokio::test]
    async fn test_update_advances_version_and_rejects_stale() {
        let repo = MemoryProductRepository::new();
        let created = repo.create(&draft("Drill", 49.5, 1)).await.unwrap();

        let updated = repo
            .update_if_version(created.id, 0, &draft("Cordless drill", 59.0, 1))
            .await
            .unwrap();
        assert_eq!(updated.version, 1);
        assert_eq!(updated.name, "Cordless drill");

        let err = repo
            .update_if_version(created.id, 0, &draft("Hammer drill", 79.0, 1))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
    }

    #[tokio::test]
    async fn test_count_by_category() {
        let repo = MemoryProductRepository::new();
        repo.create(&draft("Saw", 10.0, 1)).await.unwrap();
        repo.create(&draft("Level", 12.0, 1)).await.unwrap();
        repo.create(&draft("Cable", 3.0, 2)).await.unwrap();
        assert_eq!(repo.count_by_category(1).await.unwrap(), 2);
        assert_eq!(repo.count_by_category(3).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_sort_by_price() {
        let repo = MemoryProductRepository::new();
        repo.create(&draft("B", 5.0, 1)).await.unwrap();
        repo.create(&draft("A", 1.5, 1)).await.unwrap();
        let page = repo
            .find_all(&PageRequest::default(), &SortField::asc("price"))
            .await
            .unwrap();
        assert_eq!(page.items[0].name, "A");
    }
}
