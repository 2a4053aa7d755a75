use crate::{
    modules::movies::domain::{Movie, MovieCatalog, MovieDetails},
    shared::{
        config::TmdbConfig,
        errors::AppResult,
        infrastructure::http_client::RateLimitClient,
        utils::LogContext,
    },
};
use async_trait::async_trait;

use super::{mapper::TmdbMapper, models::*};

/// TMDB (The Movie Database) v3 REST client
///
/// Every request carries the bearer credential header; the details endpoint
/// additionally takes the key as `api_key` query parameter.
pub struct TmdbClient {
    http_client: RateLimitClient,
    base_url: String,
    api_key: String,
    mapper: TmdbMapper,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> AppResult<Self> {
        let http_client = RateLimitClient::for_tmdb(&config)?;
        Ok(Self::with_client(http_client, config))
    }

    /// Create client with custom HTTP client (for testing)
    pub fn with_client(http_client: RateLimitClient, config: TmdbConfig) -> Self {
        Self {
            http_client,
            base_url: config.base_url,
            api_key: config.api_key,
            mapper: TmdbMapper::new(),
        }
    }

    /// Search URL for a query, or the popularity listing for a blank one
    pub fn movies_url(&self, query: &str) -> String {
        let query = query.trim();
        if query.is_empty() {
            format!("{}/discover/movie?sort_by=popularity.desc", self.base_url)
        } else {
            format!(
                "{}/search/movie?query={}",
                self.base_url,
                urlencoding::encode(query)
            )
        }
    }

    pub fn movie_details_url(&self, movie_id: i64) -> String {
        format!(
            "{}/movie/{}?api_key={}",
            self.base_url,
            movie_id,
            urlencoding::encode(&self.api_key)
        )
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn fetch_movies(&self, query: &str) -> AppResult<Vec<Movie>> {
        let url = self.movies_url(query);
        let label = if query.trim().is_empty() {
            "<popular>"
        } else {
            query
        };
        LogContext::search_operation(label, Some("TMDB"), None);

        let response: TmdbMovieListResponse = self
            .http_client
            .get(&url, "Failed to fetch movies")
            .await?;

        let movies = self.mapper.map_movies(response.results);
        LogContext::search_operation(label, Some("TMDB"), Some(movies.len()));
        Ok(movies)
    }

    async fn fetch_movie_details(&self, movie_id: i64) -> AppResult<MovieDetails> {
        let url = self.movie_details_url(movie_id);

        log::info!("TMDB: Getting movie details for ID '{}'", movie_id);

        let details: TmdbMovieDetails = self
            .http_client
            .get(&url, "Failed to fetch movie details")
            .await
            .map_err(|e| {
                log::error!("Error fetching movie details for '{}': {}", movie_id, e);
                e
            })?;

        Ok(self.mapper.map_details(details))
    }
}
