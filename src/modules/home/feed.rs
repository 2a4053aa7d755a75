use crate::modules::movies::{Movie, MovieCatalog};
use crate::modules::resource::{AsyncResource, ResourceOptions, ResourceState};
use crate::modules::search_count::{SearchCountRegistry, TrendingEntry};
use std::sync::Arc;

/// What the home screen should render
#[derive(Debug, Clone, PartialEq)]
pub enum HomeView {
    Loading,
    Error(String),
    Ready {
        /// `None` when trending data is unavailable; the row is hidden then
        trending: Option<Vec<TrendingEntry>>,
        movies: Vec<Movie>,
    },
}

/// Trending searches plus the popular movie listing, both loaded on creation
pub struct HomeFeed {
    trending: AsyncResource<Option<Vec<TrendingEntry>>>,
    latest: AsyncResource<Vec<Movie>>,
}

impl HomeFeed {
    /// Both sections start loading immediately; outside a tokio runtime they fail instead
    pub fn new(catalog: Arc<dyn MovieCatalog>, registry: Arc<SearchCountRegistry>) -> Self {
        let trending = AsyncResource::from_fn("trending", ResourceOptions::default(), move || {
            let registry = Arc::clone(&registry);
            async move { Ok(registry.get_top_trending().await) }
        });

        let latest = AsyncResource::from_fn("latest", ResourceOptions::default(), move || {
            let catalog = Arc::clone(&catalog);
            async move { catalog.fetch_movies("").await }
        });

        Self { trending, latest }
    }

    pub fn trending(&self) -> &AsyncResource<Option<Vec<TrendingEntry>>> {
        &self.trending
    }

    pub fn latest(&self) -> &AsyncResource<Vec<Movie>> {
        &self.latest
    }

    pub fn view(&self) -> HomeView {
        compose_view(&self.latest.state(), &self.trending.state())
    }

    /// Reload both sections concurrently
    pub async fn refresh(&self) {
        tokio::join!(self.trending.run(), self.latest.run());
    }

    /// Wait until neither section is loading
    pub async fn settled(&self) -> HomeView {
        let mut trending = self.trending.subscribe();
        let mut latest = self.latest.subscribe();
        // Err only if the sender is gone, which cannot happen while `self` lives
        let _ = trending.wait_for(|state| !state.is_loading()).await;
        let _ = latest.wait_for(|state| !state.is_loading()).await;
        self.view()
    }
}

fn compose_view(
    latest: &ResourceState<Vec<Movie>>,
    trending: &ResourceState<Option<Vec<TrendingEntry>>>,
) -> HomeView {
    if latest.is_loading() || trending.is_loading() {
        return HomeView::Loading;
    }

    if let Some(error) = latest.error.as_ref().or(trending.error.as_ref()) {
        return HomeView::Error(error.message().to_string());
    }

    HomeView::Ready {
        trending: trending.data.clone().flatten(),
        movies: latest.data.clone().unwrap_or_default(),
    }
}
