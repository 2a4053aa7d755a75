/// Search count module
///
/// Tracks how often each search term is used and which movie it led to, and
/// exposes the most searched terms as the trending row.
///
/// Architecture:
/// - Domain: Records, trending projection and the `SearchCountStore` port
/// - Application: `SearchCountRegistry` (upsert and trending queries)
/// - Infrastructure: Appwrite REST store and an in-memory store
pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy access
pub use application::SearchCountRegistry;
pub use domain::{
    MovieRef, NewSearchCount, SearchCountRecord, SearchCountStore, TrendingEntry, TRENDING_LIMIT,
};
pub use infrastructure::{AppwriteSearchCountStore, InMemorySearchCountStore};
