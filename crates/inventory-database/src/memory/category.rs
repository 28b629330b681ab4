//! In-memory category repository.

use std::cmp::Ordering;

use async_trait::async_trait;

use inventory_core::result::AppResult;
use inventory_core::traits::VersionedRepository;
use inventory_core::types::{PageRequest, PageResponse, SortDirection, SortField};
use inventory_entity::category::{Category, CategoryDraft, SORTABLE_FIELDS};

use super::table::MemoryTable;

/// Categories held in process memory.
#[derive(Debug)]
pub struct MemoryCategoryRepository {
    table: MemoryTable<Category>,
}

impl MemoryCategoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new("Category"),
        }
    }
}

impl Default for MemoryCategoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn compare(a: &Category, b: &Category, sort: &SortField) -> Ordering {
    let ordering = match sort.field.as_str() {
        "name" => a.name.cmp(&b.name),
        _ => a.id.cmp(&b.id),
    };
    match sort.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

#[async_trait]
impl VersionedRepository<Category, CategoryDraft> for MemoryCategoryRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Category>> {
        Ok(self.table.get(id))
    }

    async fn find_all(
        &self,
        page: &PageRequest,
        sort: &SortField,
    ) -> AppResult<PageResponse<Category>> {
        sort.ensure_one_of(SORTABLE_FIELDS)?;
        Ok(self.table.page(page, |a, b| compare(a, b, sort)))
    }

    async fn create(&self, draft: &CategoryDraft) -> AppResult<Category> {
        Ok(self.table.insert_with(|id| Category {
            id,
            name: draft.name.clone(),
            version: 0,
        }))
    }

    async fn update_if_version(
        &self,
        id: i64,
        expected_version: i64,
        draft: &CategoryDraft,
    ) -> AppResult<Category> {
        self.table
            .replace_if_version(id, expected_version, |current| Category {
                id: current.id,
                name: draft.name.clone(),
                version: current.version + 1,
            })
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.table.remove(id))
    }
}
