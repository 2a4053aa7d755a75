use crate::modules::search_count::domain::{NewSearchCount, SearchCountRecord, SearchCountStore};
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use uuid::Uuid;

#[derive(Debug, Clone)]
struct StoredRecord {
    record: SearchCountRecord,
    sequence: u64, // insertion order, used as tie-breaker
}

/// Process-local search count store
///
/// Behaves like the hosted store (server-assigned ids, no uniqueness
/// enforcement) and can be flipped into an unreachable mode to exercise
/// failure paths.
#[derive(Debug, Default)]
pub struct InMemorySearchCountStore {
    records: DashMap<String, StoredRecord>,
    next_sequence: AtomicU64,
    unreachable: AtomicBool,
}

impl InMemorySearchCountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail (or succeed again)
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// All records in insertion order
    pub fn records(&self) -> Vec<SearchCountRecord> {
        let mut stored: Vec<StoredRecord> = self.records.iter().map(|e| e.value().clone()).collect();
        stored.sort_by_key(|s| s.sequence);
        stored.into_iter().map(|s| s.record).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn ensure_reachable(&self) -> AppResult<()> {
        if self.unreachable.load(Ordering::SeqCst) {
            Err(AppError::StoreError("Document store is unreachable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SearchCountStore for InMemorySearchCountStore {
    async fn find_by_term(&self, term: &str) -> AppResult<Option<SearchCountRecord>> {
        self.ensure_reachable()?;
        Ok(self
            .records
            .iter()
            .filter(|e| e.value().record.search_term == term)
            .min_by_key(|e| e.value().sequence)
            .map(|e| e.value().record.clone()))
    }

    async fn create(&self, record: NewSearchCount) -> AppResult<SearchCountRecord> {
        self.ensure_reachable()?;
        let id = Uuid::new_v4().simple().to_string();
        let created = SearchCountRecord {
            id: id.clone(),
            search_term: record.search_term,
            movie_id: record.movie_id,
            title: record.title,
            poster_url: record.poster_url,
            count: record.count,
        };
        self.records.insert(
            id,
            StoredRecord {
                record: created.clone(),
                sequence: self.next_sequence.fetch_add(1, Ordering::SeqCst),
            },
        );
        Ok(created)
    }

    async fn update_count(&self, id: &str, count: i64) -> AppResult<SearchCountRecord> {
        self.ensure_reachable()?;
        let mut stored = self
            .records
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Search count document '{}'", id)))?;
        stored.record.count = count;
        Ok(stored.record.clone())
    }

    async fn list_top(&self, limit: usize) -> AppResult<Vec<SearchCountRecord>> {
        self.ensure_reachable()?;
        let mut stored: Vec<StoredRecord> = self.records.iter().map(|e| e.value().clone()).collect();
        stored.sort_by(|a, b| b.record.count.cmp(&a.record.count).then(a.sequence.cmp(&b.sequence)));
        Ok(stored.into_iter().take(limit).map(|s| s.record).collect())
    }
}
