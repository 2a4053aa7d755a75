use super::entities::{NewSearchCount, SearchCountRecord};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Document store holding one counter record per search term
///
/// The store offers plain list/create/update operations; it is not expected
/// to provide atomic increments or compare-and-swap.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchCountStore: Send + Sync {
    /// Record whose `searchTerm` equals `term`, if any
    async fn find_by_term(&self, term: &str) -> AppResult<Option<SearchCountRecord>>;

    /// Insert a record; the store assigns its id
    async fn create(&self, record: NewSearchCount) -> AppResult<SearchCountRecord>;

    /// Overwrite the counter of the record with the given id
    async fn update_count(&self, id: &str, count: i64) -> AppResult<SearchCountRecord>;

    /// Records ordered by count descending (ties in creation order)
    async fn list_top(&self, limit: usize) -> AppResult<Vec<SearchCountRecord>>;
}
