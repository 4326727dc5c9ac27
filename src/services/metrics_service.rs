//! Domain service for search-popularity metrics.
//!
//! This module provides the [`MetricsService`] trait, abstracting the
//! upsert-by-search-term recorder and the trending lookup over the remote
//! metrics table.

use thiserror::Error;

use crate::models::{Movie, SearchMetric};
use crate::storage::StorageError;

/// Domain errors for metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Metric lookup failed: {0}")]
    Lookup(#[source] StorageError),

    #[error("Metric write failed: {0}")]
    Write(#[source] StorageError),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// What the recorder did to the table for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// No row existed for the term; one was inserted with `count = 1`.
    Inserted,

    /// An existing row's counter was bumped to `count`.
    Incremented { count: i64 },
}

/// Domain service trait for search-popularity metrics.
#[async_trait::async_trait]
pub trait MetricsService: Send + Sync {
    /// Records one more occurrence of `term` resolving to `movie`.
    ///
    /// Performs one remote read, then exactly one remote write: the row for
    /// `term` is incremented if it exists, otherwise a fresh row is inserted
    /// with `count = 1`, the movie's id, and its poster URL.
    ///
    /// No ordering is guaranteed across concurrent invocations for the same
    /// term; two racing calls for a brand-new term may both insert.
    ///
    /// # Errors
    ///
    /// - Returns [`MetricsError::Validation`] for an empty term
    /// - Returns [`MetricsError::Lookup`] if the read fails (no write is
    ///   attempted in that case)
    /// - Returns [`MetricsError::Write`] if the update or insert fails
    async fn record_search(&self, term: &str, movie: &Movie)
    -> Result<RecordOutcome, MetricsError>;

    /// The most-searched terms, ordered by count descending.
    ///
    /// # Errors
    ///
    /// - Returns [`MetricsError::Lookup`] on storage failures
    async fn trending(&self, limit: usize) -> Result<Vec<SearchMetric>, MetricsError>;
}
