pub mod entities;
pub mod repository;

pub use entities::{MovieRef, NewSearchCount, SearchCountRecord, TrendingEntry, TRENDING_LIMIT};
pub use repository::SearchCountStore;
