//! Remote storage for search-popularity rows.
//!
//! The table lives in a hosted Postgres instance reached through Supabase's
//! REST layer (PostgREST). [`MetricsStore`] is the seam between the recorder
//! logic and the wire: the production implementation is [`SupabaseClient`],
//! tests substitute an in-memory one.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewSearchMetric, SearchMetric};

pub mod supabase;
pub use supabase::SupabaseClient;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("storage responded {status}: {body}")]
    Backend {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("storage returned an empty result for an insert")]
    EmptyInsert,
}

/// Operations the recorder performs against the shared table.
///
/// Lookup and write are separate requests with no transaction between them;
/// callers that race on the same term can observe stale reads.
#[async_trait]
pub trait MetricsStore: Send + Sync {
    /// Select-by-equality on `search_term`, limited to one row. An empty
    /// result set is `Ok(None)`, never an error.
    async fn find_by_term(&self, term: &str) -> Result<Option<SearchMetric>, StorageError>;

    /// Update-by-id, setting `count` to `new_count`.
    async fn increment_count(&self, id: i64, new_count: i64) -> Result<(), StorageError>;

    /// Insert-one, returning the stored representation.
    async fn insert(&self, metric: NewSearchMetric) -> Result<SearchMetric, StorageError>;

    /// Rows ordered by `count` descending, at most `limit`.
    async fn top_by_count(&self, limit: usize) -> Result<Vec<SearchMetric>, StorageError>;
}
