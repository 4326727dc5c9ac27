//! TMDB-backed implementation of the `SearchService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::clients::TmdbClient;
use crate::constants::limits::MAX_SEARCH_RESULTS;
use crate::models::Movie;
use crate::services::metrics_service::MetricsService;
use crate::services::search_service::{SearchError, SearchService};

pub struct TmdbSearchService {
    tmdb: Arc<TmdbClient>,
    metrics: Option<Arc<dyn MetricsService>>,
}

impl TmdbSearchService {
    #[must_use]
    pub fn new(tmdb: Arc<TmdbClient>, metrics: Option<Arc<dyn MetricsService>>) -> Self {
        Self { tmdb, metrics }
    }

    /// Hands the term and its first match to the recorder without waiting
    /// for the write. The search response must never block on, or surface,
    /// analytics failures.
    fn record_in_background(&self, term: &str, movie: &Movie) {
        let Some(metrics) = self.metrics.clone() else {
            return;
        };
        let term = term.to_string();
        let movie = movie.clone();

        tokio::spawn(async move {
            match metrics.record_search(&term, &movie).await {
                Ok(outcome) => debug!(term = %term, ?outcome, "Search metric recorded"),
                Err(e) => warn!(term = %term, "Failed to record search metric: {e}"),
            }
        });
    }
}

#[async_trait]
impl SearchService for TmdbSearchService {
    async fn search(&self, query: &str) -> Result<Vec<Movie>, SearchError> {
        let mut movies = self.tmdb.search_movies(query).await?;
        movies.truncate(MAX_SEARCH_RESULTS);

        if !query.trim().is_empty()
            && let Some(first) = movies.first()
        {
            self.record_in_background(query, first);
        }

        Ok(movies)
    }

    async fn browse(&self) -> Result<Vec<Movie>, SearchError> {
        let mut movies = self.tmdb.discover_movies().await?;
        movies.truncate(MAX_SEARCH_RESULTS);
        Ok(movies)
    }
}
