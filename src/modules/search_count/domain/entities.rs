use crate::modules::movies::domain::{poster_url, Movie};
use serde::{Deserialize, Serialize};

/// Number of entries in the trending row
pub const TRENDING_LIMIT: usize = 5;

/// Per-term search counter as persisted in the document store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCountRecord {
    /// Assigned by the store
    pub id: String,
    pub search_term: String,
    pub movie_id: i64,
    pub title: String,
    pub poster_url: Option<String>,
    pub count: i64,
}

impl SearchCountRecord {
    pub fn to_trending_entry(&self) -> TrendingEntry {
        TrendingEntry {
            search_term: self.search_term.clone(),
            movie_id: self.movie_id,
            title: self.title.clone(),
            poster_url: self.poster_url.clone(),
            count: self.count,
        }
    }
}

/// Insert shape for a term searched for the first time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSearchCount {
    pub search_term: String,
    pub movie_id: i64,
    pub title: String,
    pub poster_url: Option<String>,
    pub count: i64,
}

impl NewSearchCount {
    pub fn first_search(term: &str, movie: &MovieRef) -> Self {
        Self {
            search_term: term.to_string(),
            movie_id: movie.id,
            title: movie.title.clone(),
            poster_url: poster_url(movie.poster_path.as_deref()),
            count: 1,
        }
    }
}

/// The movie a search resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRef {
    pub id: i64,
    pub title: String,
    pub poster_path: Option<String>,
}

impl MovieRef {
    pub fn new(id: i64, title: impl Into<String>, poster_path: Option<&str>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: poster_path.map(str::to_string),
        }
    }
}

impl From<&Movie> for MovieRef {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_path: movie.poster_path.clone(),
        }
    }
}

/// A search counter re-used as a ranked display item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingEntry {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    pub movie_id: i64,
    pub title: String,
    pub poster_url: Option<String>,
    pub count: i64,
}
