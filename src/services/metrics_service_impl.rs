//! Supabase-backed implementation of the `MetricsService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::constants::limits::MAX_TRENDING_LIMIT;
use crate::models::{Movie, NewSearchMetric, SearchMetric};
use crate::services::metrics_service::{MetricsError, MetricsService, RecordOutcome};
use crate::storage::MetricsStore;

pub struct SupabaseMetricsService {
    store: Arc<dyn MetricsStore>,
}

impl SupabaseMetricsService {
    #[must_use]
    pub fn new(store: Arc<dyn MetricsStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MetricsService for SupabaseMetricsService {
    async fn record_search(
        &self,
        term: &str,
        movie: &Movie,
    ) -> Result<RecordOutcome, MetricsError> {
        if term.trim().is_empty() {
            return Err(MetricsError::Validation(
                "Search term cannot be empty".to_string(),
            ));
        }

        let existing = self
            .store
            .find_by_term(term)
            .await
            .map_err(MetricsError::Lookup)?;

        // Lookup and write are separate requests. Two invocations racing on
        // a fresh term can both see no row and both insert.
        match existing {
            Some(row) => {
                let count = row.count + 1;
                self.store
                    .increment_count(row.id, count)
                    .await
                    .map_err(MetricsError::Write)?;

                debug!(term, count, "Incremented search metric");
                Ok(RecordOutcome::Incremented { count })
            }
            None => {
                let metric = NewSearchMetric {
                    search_term: term.to_string(),
                    count: 1,
                    movie_id: movie.id,
                    poster_url: movie.poster_url(),
                };
                self.store.insert(metric).await.map_err(MetricsError::Write)?;

                debug!(term, movie_id = movie.id, "Recorded first search of term");
                Ok(RecordOutcome::Inserted)
            }
        }
    }

    async fn trending(&self, limit: usize) -> Result<Vec<SearchMetric>, MetricsError> {
        let limit = limit.min(MAX_TRENDING_LIMIT);
        self.store
            .top_by_count(limit)
            .await
            .map_err(MetricsError::Lookup)
    }
}
