use crate::modules::search_count::domain::{
    MovieRef, NewSearchCount, SearchCountRecord, SearchCountStore, TrendingEntry, TRENDING_LIMIT,
};
use crate::shared::errors::{AppError, AppResult};
use crate::{log_debug, log_error, log_info};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Counts how often each search term is used and exposes the top terms
///
/// The store only offers read-then-write, so `record` holds a per-term lock
/// for the whole lookup/update sequence. Concurrent searches for the same
/// term are applied one after another; different terms proceed in parallel.
pub struct SearchCountRegistry {
    store: Arc<dyn SearchCountStore>,
    term_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl SearchCountRegistry {
    pub fn new(store: Arc<dyn SearchCountStore>) -> Self {
        Self {
            store,
            term_locks: DashMap::new(),
        }
    }

    /// Increment the counter for `term`, creating it on first use
    ///
    /// Store failures propagate; the caller decides how to surface them.
    pub async fn record(&self, term: &str, movie: &MovieRef) -> AppResult<SearchCountRecord> {
        // Declared before the lock so it runs after the lock handle is dropped
        let _release = TermLockRelease {
            locks: &self.term_locks,
            term,
        };
        let lock = self.term_lock(term);
        let result = {
            let _guard = lock.lock().await;
            self.upsert(term, movie).await
        };
        drop(lock);

        result.map_err(|e| {
            log_error!("Error updating search count for '{}': {}", term, e);
            e
        })
    }

    async fn upsert(&self, term: &str, movie: &MovieRef) -> AppResult<SearchCountRecord> {
        match self.store.find_by_term(term).await? {
            Some(existing) => {
                let next = existing.count.checked_add(1).ok_or_else(|| {
                    AppError::StoreError(format!(
                        "Search count for '{}' cannot grow past {}",
                        term, existing.count
                    ))
                })?;
                let record = self.store.update_count(&existing.id, next).await?;
                log_debug!("Search count for '{}' is now {}", term, record.count);
                Ok(record)
            }
            None => {
                let record = self
                    .store
                    .create(NewSearchCount::first_search(term, movie))
                    .await?;
                log_info!(
                    "Started search count for '{}' (movie {} '{}')",
                    term,
                    record.movie_id,
                    record.title
                );
                Ok(record)
            }
        }
    }

    /// Most searched terms, highest count first
    ///
    /// Trending is decorative: any store failure yields `None` instead of an error.
    pub async fn get_top_trending(&self) -> Option<Vec<TrendingEntry>> {
        match self.store.list_top(TRENDING_LIMIT).await {
            Ok(mut records) => {
                // Stable: equal counts keep the store's order
                records.sort_by(|a, b| b.count.cmp(&a.count));
                Some(
                    records
                        .iter()
                        .take(TRENDING_LIMIT)
                        .map(SearchCountRecord::to_trending_entry)
                        .collect(),
                )
            }
            Err(e) => {
                log_error!("Failed to load trending searches: {}", e);
                None
            }
        }
    }

    fn term_lock(&self, term: &str) -> Arc<Mutex<()>> {
        self.term_locks
            .entry(term.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    #[cfg(test)]
    fn tracked_terms(&self) -> usize {
        self.term_locks.len()
    }
}

/// Removes a term's lock entry once nobody else holds or waits on it
///
/// Runs on drop so a cancelled `record` cleans up as well.
struct TermLockRelease<'a> {
    locks: &'a DashMap<String, Arc<Mutex<()>>>,
    term: &'a str,
}

impl Drop for TermLockRelease<'_> {
    fn drop(&mut self) {
        self.locks
            .remove_if(self.term, |_, lock| Arc::strong_count(lock) == 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::search_count::domain::repository::MockSearchCountStore;
    use async_trait::async_trait;
    use mockall::predicate::eq;
    use tokio_test::{assert_pending, task};

    fn dune() -> MovieRef {
        MovieRef::new(438631, "Dune", Some("/abc.jpg"))
    }

    fn record(id: &str, term: &str, count: i64) -> SearchCountRecord {
        SearchCountRecord {
            id: id.to_string(),
            search_term: term.to_string(),
            movie_id: 438631,
            title: "Dune".to_string(),
            poster_url: Some("https://image.tmdb.org/t/p/w500/abc.jpg".to_string()),
            count,
        }
    }

    #[tokio::test]
    async fn first_search_creates_record_with_count_one() {
        let mut store = MockSearchCountStore::new();
        store
            .expect_find_by_term()
            .with(eq("dune"))
            .times(1)
            .returning(|_| Ok(None));
        store
            .expect_create()
            .withf(|new| {
                new.search_term == "dune"
                    && new.count == 1
                    && new.movie_id == 438631
                    && new.poster_url.as_deref() == Some("https://image.tmdb.org/t/p/w500/abc.jpg")
            })
            .times(1)
            .returning(|_| Ok(record("doc-1", "dune", 1)));
        store.expect_update_count().never();

        let registry = SearchCountRegistry::new(Arc::new(store));
        let saved = registry.record("dune", &dune()).await.unwrap();

        assert_eq!(saved.count, 1);
        assert_eq!(registry.tracked_terms(), 0);
    }

    #[tokio::test]
    async fn repeated_search_increments_by_id() {
        let mut store = MockSearchCountStore::new();
        store
            .expect_find_by_term()
            .returning(|_| Ok(Some(record("doc-7", "dune", 4))));
        store
            .expect_update_count()
            .with(eq("doc-7"), eq(5))
            .times(1)
            .returning(|_, count| Ok(record("doc-7", "dune", count)));
        store.expect_create().never();

        let registry = SearchCountRegistry::new(Arc::new(store));
        let saved = registry.record("dune", &dune()).await.unwrap();

        assert_eq!(saved.count, 5);
    }

    #[tokio::test]
    async fn lookup_failure_propagates() {
        let mut store = MockSearchCountStore::new();
        store
            .expect_find_by_term()
            .returning(|_| Err(AppError::StoreError("unreachable".to_string())));
        store.expect_create().never();

        let registry = SearchCountRegistry::new(Arc::new(store));
        let err = registry.record("dune", &dune()).await.unwrap_err();

        assert_eq!(err, AppError::StoreError("unreachable".to_string()));
        assert_eq!(registry.tracked_terms(), 0);
    }

    #[tokio::test]
    async fn write_failures_propagate() {
        let mut store = MockSearchCountStore::new();
        store
            .expect_find_by_term()
            .with(eq("dune"))
            .returning(|_| Ok(Some(record("doc-7", "dune", 1))));
        store
            .expect_update_count()
            .returning(|_, _| Err(AppError::StoreError("write rejected".to_string())));
        store
            .expect_find_by_term()
            .with(eq("arrival"))
            .returning(|_| Ok(None));
        store
            .expect_create()
            .returning(|_| Err(AppError::StoreError("quota exceeded".to_string())));

        let registry = SearchCountRegistry::new(Arc::new(store));

        assert!(registry.record("dune", &dune()).await.is_err());
        assert_eq!(
            registry.record("arrival", &dune()).await.unwrap_err(),
            AppError::StoreError("quota exceeded".to_string())
        );
    }

    #[tokio::test]
    async fn blank_term_is_counted_like_any_other() {
        let mut store = MockSearchCountStore::new();
        store
            .expect_find_by_term()
            .with(eq(""))
            .times(1)
            .returning(|_| Ok(None));
        store
            .expect_create()
            .withf(|new| new.search_term.is_empty() && new.count == 1)
            .times(1)
            .returning(|_| Ok(record("doc-0", "", 1)));

        let registry = SearchCountRegistry::new(Arc::new(store));
        let saved = registry.record("", &dune()).await.unwrap();

        assert_eq!(saved.search_term, "");
        assert_eq!(saved.count, 1);
    }

    #[tokio::test]
    async fn saturated_count_is_a_store_error() {
        let mut store = MockSearchCountStore::new();
        store
            .expect_find_by_term()
            .returning(|_| Ok(Some(record("doc-7", "dune", i64::MAX))));
        store.expect_update_count().never();

        let registry = SearchCountRegistry::new(Arc::new(store));
        let err = registry.record("dune", &dune()).await.unwrap_err();

        assert!(matches!(err, AppError::StoreError(_)));
        assert_eq!(registry.tracked_terms(), 0);
    }

    /// Store whose lookups never complete
    struct StalledStore;

    #[async_trait]
    impl SearchCountStore for StalledStore {
        async fn find_by_term(&self, _term: &str) -> AppResult<Option<SearchCountRecord>> {
            std::future::pending().await
        }

        async fn create(&self, _new: NewSearchCount) -> AppResult<SearchCountRecord> {
            std::future::pending().await
        }

        async fn update_count(&self, _id: &str, _count: i64) -> AppResult<SearchCountRecord> {
            std::future::pending().await
        }

        async fn list_top(&self, _limit: usize) -> AppResult<Vec<SearchCountRecord>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn cancelled_record_releases_its_term_lock() {
        let registry = SearchCountRegistry::new(Arc::new(StalledStore));
        let movie = dune();

        let mut pending = task::spawn(registry.record("dune", &movie));
        assert_pending!(pending.poll());
        assert_eq!(registry.tracked_terms(), 1);

        drop(pending);
        assert_eq!(registry.tracked_terms(), 0);
    }

    #[tokio::test]
    async fn trending_is_sorted_and_bounded() {
        let mut store = MockSearchCountStore::new();
        store
            .expect_list_top()
            .with(eq(TRENDING_LIMIT))
            .returning(|_| {
                Ok(vec![
                    record("a", "alien", 2),
                    record("b", "batman", 9),
                    record("c", "cars", 2),
                    record("d", "dune", 5),
                    record("e", "elf", 1),
                    record("f", "fargo", 3),
                ])
            });

        let registry = SearchCountRegistry::new(Arc::new(store));
        let trending = registry.get_top_trending().await.unwrap();

        let terms: Vec<_> = trending.iter().map(|t| t.search_term.as_str()).collect();
        assert_eq!(terms, vec!["batman", "dune", "fargo", "alien", "cars"]);
    }

    #[tokio::test]
    async fn trending_store_failure_yields_none() {
        let mut store = MockSearchCountStore::new();
        store
            .expect_list_top()
            .returning(|_| Err(AppError::StoreError("timeout".to_string())));

        let registry = SearchCountRegistry::new(Arc::new(store));
        assert_eq!(registry.get_top_trending().await, None);
    }
}
