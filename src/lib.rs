pub mod modules;
pub mod shared;

use modules::{
    home::{HomeFeed, MovieSearch},
    movies::{MovieCatalog, TmdbClient},
    search_count::{AppwriteSearchCountStore, SearchCountRegistry, SearchCountStore},
};
use shared::{AppConfig, AppResult};
use std::sync::Arc;

/// Explicitly constructed collaborators shared by the home and search screens
#[derive(Clone)]
pub struct AppServices {
    pub catalog: Arc<dyn MovieCatalog>,
    pub registry: Arc<SearchCountRegistry>,
}

impl AppServices {
    /// Wire the TMDB client and the Appwrite-backed registry from configuration
    pub fn from_config(config: AppConfig) -> AppResult<Self> {
        let catalog: Arc<dyn MovieCatalog> = Arc::new(TmdbClient::new(config.tmdb)?);
        let store: Arc<dyn SearchCountStore> =
            Arc::new(AppwriteSearchCountStore::new(config.appwrite)?);
        Ok(Self::new(catalog, store))
    }

    /// Load configuration from the environment, then wire services
    pub fn from_env() -> AppResult<Self> {
        shared::utils::init_logger();
        Self::from_config(AppConfig::from_env()?)
    }

    pub fn new(catalog: Arc<dyn MovieCatalog>, store: Arc<dyn SearchCountStore>) -> Self {
        Self {
            catalog,
            registry: Arc::new(SearchCountRegistry::new(store)),
        }
    }

    /// Home feed whose sections start loading immediately (requires a tokio runtime)
    pub fn home_feed(&self) -> HomeFeed {
        HomeFeed::new(Arc::clone(&self.catalog), Arc::clone(&self.registry))
    }

    pub fn movie_search(&self) -> MovieSearch {
        MovieSearch::new(Arc::clone(&self.catalog), Arc::clone(&self.registry))
    }
}
