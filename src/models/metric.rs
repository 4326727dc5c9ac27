use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored search-popularity row.
///
/// One row per distinct search term is the intended shape, but the storage
/// layer does not enforce it. Rows are created on the first search of a term,
/// their `count` incremented on every repeat, and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMetric {
    /// Storage-generated key.
    pub id: i64,

    pub search_term: String,

    pub count: i64,

    /// Identifier of the movie the term resolved to when the row was written.
    pub movie_id: i64,

    pub poster_url: String,

    /// Assigned by the storage backend on insert.
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payload for a first-seen search term. `id` and `created_at` are
/// assigned by storage.
#[derive(Debug, Clone, Serialize)]
pub struct NewSearchMetric {
    pub search_term: String,
    pub count: i64,
    pub movie_id: i64,
    pub poster_url: String,
}
