use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use flickarr::api;
use flickarr::clients::TmdbClient;
use flickarr::config::Config;
use flickarr::models::{Movie, NewSearchMetric, SearchMetric};
use flickarr::services::{
    MetricsService, SearchError, SearchService, SupabaseMetricsService,
};
use flickarr::state::SharedState;
use flickarr::storage::{MetricsStore, StorageError};

fn movie(id: i64, title: &str, poster_path: Option<&str>) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        poster_path: poster_path.map(ToString::to_string),
        overview: Some("An overview.".to_string()),
        release_date: Some("2010-07-15".to_string()),
        vote_average: Some(8.4),
        original_language: Some("en".to_string()),
    }
}

#[derive(Default)]
struct InMemoryStore {
    rows: Mutex<Vec<SearchMetric>>,
    next_id: Mutex<i64>,
}

#[async_trait]
impl MetricsStore for InMemoryStore {
    async fn find_by_term(&self, term: &str) -> Result<Option<SearchMetric>, StorageError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.search_term == term)
            .cloned())
    }

    async fn increment_count(&self, id: i64, new_count: i64) -> Result<(), StorageError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|r| r.id == id) {
            row.count = new_count;
        }
        Ok(())
    }

    async fn insert(&self, metric: NewSearchMetric) -> Result<SearchMetric, StorageError> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let stored = SearchMetric {
            id: *next_id,
            search_term: metric.search_term,
            count: metric.count,
            movie_id: metric.movie_id,
            poster_url: metric.poster_url,
            created_at: None,
        };
        self.rows.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn top_by_count(&self, limit: usize) -> Result<Vec<SearchMetric>, StorageError> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows.truncate(limit);
        Ok(rows)
    }
}

struct StubSearchService;

#[async_trait]
impl SearchService for StubSearchService {
    async fn search(&self, query: &str) -> Result<Vec<Movie>, SearchError> {
        if query == "nothing" {
            return Ok(vec![]);
        }
        Ok(vec![
            movie(27205, "Inception", Some("/inc.jpg")),
            movie(27206, "Inception 2", None),
        ])
    }

    async fn browse(&self) -> Result<Vec<Movie>, SearchError> {
        Ok(vec![movie(438631, "Dune", Some("/dune.jpg"))])
    }
}

fn spawn_app(with_metrics: bool) -> (Router, Option<Arc<dyn MetricsService>>) {
    let config = Config::default();
    let tmdb = Arc::new(TmdbClient::new(&config.tmdb, reqwest::Client::new()));

    let metrics_service: Option<Arc<dyn MetricsService>> = if with_metrics {
        let store: Arc<dyn MetricsStore> = Arc::new(InMemoryStore::default());
        Some(Arc::new(SupabaseMetricsService::new(store)))
    } else {
        None
    };

    let search_service: Arc<dyn SearchService> = Arc::new(StubSearchService);

    let shared = Arc::new(SharedState {
        config,
        tmdb,
        metrics_service: metrics_service.clone(),
        search_service,
    });

    let state = api::create_app_state(shared, None);
    (api::router(state), metrics_service)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

#[tokio::test]
async fn test_movie_search() {
    let (app, _) = spawn_app(true);

    let (status, body) = get_json(app, "/api/movies?query=inception").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0]["title"], "Inception");
    assert_eq!(
        body["data"][0]["poster_url"],
        "https://image.tmdb.org/t/p/w500/inc.jpg"
    );
    assert_eq!(body["data"][1]["poster_url"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_movie_search_empty_query_falls_back_to_popular() {
    let (app, _) = spawn_app(true);

    let (status, body) = get_json(app, "/api/movies").await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["title"], "Dune");
}

#[tokio::test]
async fn test_movie_search_no_matches() {
    let (app, _) = spawn_app(true);

    let (status, body) = get_json(app, "/api/movies?query=nothing").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_trending_reflects_recorded_searches() {
    let (app, metrics) = spawn_app(true);
    let metrics = metrics.unwrap();

    let inception = movie(27205, "Inception", Some("/inc.jpg"));
    let dune = movie(438631, "Dune", Some("/dune.jpg"));

    metrics.record_search("dune", &dune).await.unwrap();
    for _ in 0..3 {
        metrics.record_search("inception", &inception).await.unwrap();
    }

    let (status, body) = get_json(app, "/api/metrics/trending").await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["search_term"], "inception");
    assert_eq!(data[0]["count"], 3);
    assert_eq!(data[0]["movie_id"], 27205);
    assert_eq!(
        data[0]["poster_url"],
        "https://image.tmdb.org/t/p/w500/inc.jpg"
    );
    assert_eq!(data[1]["search_term"], "dune");
}

#[tokio::test]
async fn test_trending_respects_limit() {
    let (app, metrics) = spawn_app(true);
    let metrics = metrics.unwrap();

    for (id, term) in [(1, "a"), (2, "b"), (3, "c")] {
        metrics
            .record_search(term, &movie(id, term, None))
            .await
            .unwrap();
    }

    let (status, body) = get_json(app, "/api/metrics/trending?limit=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_trending_rejects_invalid_limit() {
    let (app, _) = spawn_app(true);

    let (status, body) = get_json(app.clone(), "/api/metrics/trending?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = get_json(app, "/api/metrics/trending?limit=9999").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_trending_unavailable_when_metrics_disabled() {
    let (app, _) = spawn_app(false);

    let (status, body) = get_json(app, "/api/metrics/trending").await;

    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_system_status() {
    let (app, _) = spawn_app(true);

    let (status, body) = get_json(app, "/api/system/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["data"]["search_metrics_enabled"], true);
}

#[tokio::test]
async fn test_prometheus_endpoint_without_recorder() {
    let (app, _) = spawn_app(true);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
