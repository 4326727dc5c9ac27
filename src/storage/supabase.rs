use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::json;
use tracing::debug;

use super::{MetricsStore, StorageError};
use crate::config::SupabaseConfig;
use crate::models::{NewSearchMetric, SearchMetric};

/// PostgREST client for the search-metrics table.
///
/// Every request carries the project key as both `apikey` and bearer token,
/// which is how Supabase expects its REST endpoints to be called.
#[derive(Clone)]
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl SupabaseClient {
    pub fn new(config: &SupabaseConfig, client: Client) -> anyhow::Result<Self> {
        let base_url = url::Url::parse(&config.url)
            .map_err(|e| anyhow::anyhow!("Invalid Supabase URL '{}': {e}", config.url))?;

        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            table: config.table.clone(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn check(response: Response) -> Result<Response, StorageError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(StorageError::Backend { status, body })
    }
}

#[async_trait]
impl MetricsStore for SupabaseClient {
    async fn find_by_term(&self, term: &str) -> Result<Option<SearchMetric>, StorageError> {
        let url = format!(
            "{}?select=*&search_term=eq.{}&limit=1",
            self.table_url(),
            urlencoding::encode(term)
        );

        let response = Self::check(self.authed(self.client.get(&url)).send().await?).await?;

        // PostgREST answers an empty equality select with `200 []`, so the
        // no-row outcome never takes the error path.
        let mut rows: Vec<SearchMetric> = response.json().await?;
        Ok(rows.pop())
    }

    async fn increment_count(&self, id: i64, new_count: i64) -> Result<(), StorageError> {
        let url = format!("{}?id=eq.{}", self.table_url(), id);

        let response = self
            .authed(self.client.patch(&url))
            .json(&json!({ "count": new_count }))
            .send()
            .await?;
        Self::check(response).await?;

        debug!(id, new_count, "Updated search metric count");
        Ok(())
    }

    async fn insert(&self, metric: NewSearchMetric) -> Result<SearchMetric, StorageError> {
        let response = self
            .authed(self.client.post(self.table_url()))
            .header("Prefer", "return=representation")
            .json(&metric)
            .send()
            .await?;
        let response = Self::check(response).await?;

        let mut rows: Vec<SearchMetric> = response.json().await?;
        let stored = rows.pop().ok_or(StorageError::EmptyInsert)?;

        debug!(term = %stored.search_term, id = stored.id, "Inserted search metric");
        Ok(stored)
    }

    async fn top_by_count(&self, limit: usize) -> Result<Vec<SearchMetric>, StorageError> {
        let url = format!(
            "{}?select=*&order=count.desc&limit={}",
            self.table_url(),
            limit
        );

        let response = Self::check(self.authed(self.client.get(&url)).send().await?).await?;

        Ok(response.json().await?)
    }
}
