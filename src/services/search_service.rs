//! Domain service for movie search.

use thiserror::Error;

use crate::models::Movie;

/// Domain errors for movie search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Movie provider error: {0}")]
    Provider(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<anyhow::Error> for SearchError {
    fn from(err: anyhow::Error) -> Self {
        Self::Provider(err.to_string())
    }
}

/// Domain service trait for movie search operations.
#[async_trait::async_trait]
pub trait SearchService: Send + Sync {
    /// Searches the metadata provider for `query` and, when metrics are
    /// enabled and at least one movie matched, records the search term
    /// against the first match. Recording is fire-and-forget: its outcome
    /// never affects the returned results.
    ///
    /// # Errors
    ///
    /// - Returns [`SearchError::Provider`] if the metadata provider call fails
    async fn search(&self, query: &str) -> Result<Vec<Movie>, SearchError>;

    /// Popular movies for an empty query, straight from the provider. No
    /// metric is recorded.
    ///
    /// # Errors
    ///
    /// - Returns [`SearchError::Provider`] if the metadata provider call fails
    async fn browse(&self) -> Result<Vec<Movie>, SearchError>;
}
