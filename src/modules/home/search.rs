use crate::modules::movies::{Movie, MovieCatalog};
use crate::modules::resource::{AsyncResource, ResourceOptions, ResourceState, ResourceStatus};
use crate::modules::search_count::{MovieRef, SearchCountRegistry};
use std::sync::{Arc, Mutex};

/// Search box flow: fetch results for a query and count the search
pub struct MovieSearch {
    query: Arc<Mutex<String>>,
    results: AsyncResource<Vec<Movie>>,
    registry: Arc<SearchCountRegistry>,
}

impl MovieSearch {
    pub fn new(catalog: Arc<dyn MovieCatalog>, registry: Arc<SearchCountRegistry>) -> Self {
        let query = Arc::new(Mutex::new(String::new()));
        let producer_query = Arc::clone(&query);

        let results = AsyncResource::from_fn("search", ResourceOptions::manual(), move || {
            let catalog = Arc::clone(&catalog);
            let query = read_query(&producer_query);
            async move { catalog.fetch_movies(&query).await }
        });

        Self {
            query,
            results,
            registry,
        }
    }

    pub fn query(&self) -> String {
        read_query(&self.query)
    }

    pub fn results(&self) -> &AsyncResource<Vec<Movie>> {
        &self.results
    }

    /// Run a search and count it against the top result
    ///
    /// A failure to record the count is logged and does not affect the results.
    pub async fn search(&self, query: &str) -> ResourceState<Vec<Movie>> {
        self.set_query(query);
        self.results.run().await;

        let state = self.results.state();
        // A newer search may have replaced ours while it was in flight
        if state.status != ResourceStatus::Succeeded || self.query() != query {
            return state;
        }

        if !query.trim().is_empty() {
            if let Some(top) = state.data.as_ref().and_then(|movies| movies.first()) {
                if let Err(e) = self.registry.record(query, &MovieRef::from(top)).await {
                    log::warn!("Search for '{}' succeeded but was not counted: {}", query, e);
                }
            }
        }
        state
    }

    pub fn clear(&self) {
        self.set_query("");
        self.results.reset();
    }

    fn set_query(&self, query: &str) {
        let mut current = match self.query.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *current = query.to_string();
    }
}

fn read_query(query: &Mutex<String>) -> String {
    match query.lock() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}
