use std::sync::Arc;

use crate::clients::TmdbClient;
use crate::config::Config;
use crate::services::{
    MetricsService, SearchService, SupabaseMetricsService, TmdbSearchService,
};
use crate::storage::{MetricsStore, SupabaseClient};

/// Build a shared HTTP client with reasonable defaults for API calls.
/// This client should be reused across all HTTP-based services to enable
/// connection pooling and avoid socket exhaustion.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent("Flickarr/1.0")
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

/// Everything constructed once at startup and injected downward. Nothing in
/// the crate holds a client in module-level state.
#[derive(Clone)]
pub struct SharedState {
    pub config: Config,

    pub tmdb: Arc<TmdbClient>,

    /// `None` when the metrics table is disabled in config; search keeps
    /// working, nothing gets recorded.
    pub metrics_service: Option<Arc<dyn MetricsService>>,

    pub search_service: Arc<dyn SearchService>,
}

impl SharedState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http_client = build_shared_http_client(config.general.request_timeout_seconds)?;

        let tmdb = Arc::new(TmdbClient::new(&config.tmdb, http_client.clone()));

        let metrics_service: Option<Arc<dyn MetricsService>> = if config.supabase.enabled {
            let store: Arc<dyn MetricsStore> =
                Arc::new(SupabaseClient::new(&config.supabase, http_client)?);
            Some(Arc::new(SupabaseMetricsService::new(store)))
        } else {
            None
        };

        let search_service: Arc<dyn SearchService> = Arc::new(TmdbSearchService::new(
            tmdb.clone(),
            metrics_service.clone(),
        ));

        Ok(Self {
            config,
            tmdb,
            metrics_service,
            search_service,
        })
    }
}
