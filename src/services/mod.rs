pub mod metrics_service;
pub mod metrics_service_impl;
pub use metrics_service::{MetricsError, MetricsService, RecordOutcome};
pub use metrics_service_impl::SupabaseMetricsService;

pub mod search_service;
pub mod search_service_impl;
pub use search_service::{SearchError, SearchService};
pub use search_service_impl::TmdbSearchService;
