use super::entities::{Movie, MovieDetails};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Source of movie metadata
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Search by title, or list popular movies when `query` is blank
    async fn fetch_movies(&self, query: &str) -> AppResult<Vec<Movie>>;

    /// Full details for one movie
    async fn fetch_movie_details(&self, movie_id: i64) -> AppResult<MovieDetails>;
}
