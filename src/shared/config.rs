//! Environment-driven configuration
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file. Each collaborator gets its own plain config struct so tests can build
//! them directly against mock servers.

use crate::shared::errors::{AppError, AppResult};
use std::env;

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_APPWRITE_ENDPOINT: &str = "https://cloud.appwrite.io/v1";

/// Movie metadata API settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmdbConfig {
    pub base_url: String,
    /// Read access token, sent both as bearer credential and `api_key` parameter
    pub api_key: String,
}

impl TmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_TMDB_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Hosted document database settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppwriteConfig {
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub collection_id: String,
    pub api_key: Option<String>,
}

impl AppwriteConfig {
    pub fn new(
        project_id: impl Into<String>,
        database_id: impl Into<String>,
        collection_id: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: DEFAULT_APPWRITE_ENDPOINT.to_string(),
            project_id: project_id.into(),
            database_id: database_id.into(),
            collection_id: collection_id.into(),
            api_key: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub tmdb: TmdbConfig,
    pub appwrite: AppwriteConfig,
}

impl AppConfig {
    /// Load configuration from `.env` (if present) and the process environment
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| {
                AppError::ConfigError(format!("{} environment variable not set", key))
            })
        };

        let tmdb = TmdbConfig::new(require("TMDB_API_KEY")?).with_base_url(
            get("TMDB_BASE_URL").unwrap_or_else(|| DEFAULT_TMDB_BASE_URL.to_string()),
        );

        let mut appwrite = AppwriteConfig::new(
            require("APPWRITE_PROJECT_ID")?,
            require("APPWRITE_DATABASE_ID")?,
            require("APPWRITE_COLLECTION_ID")?,
        )
        .with_endpoint(
            get("APPWRITE_ENDPOINT").unwrap_or_else(|| DEFAULT_APPWRITE_ENDPOINT.to_string()),
        );
        if let Some(key) = get("APPWRITE_API_KEY") {
            appwrite = appwrite.with_api_key(key);
        }

        Ok(Self { tmdb, appwrite })
    }
}
