use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, MovieDto};

#[derive(Debug, Deserialize)]
pub struct MovieSearchRequest {
    pub query: Option<String>,
}

/// `GET /api/movies?query=`
///
/// An empty or absent query returns the provider's popular movies, which is
/// what the search UI shows before the user types anything.
pub async fn search_movies(
    State(state): State<Arc<AppState>>,
    Query(request): Query<MovieSearchRequest>,
) -> Result<Json<ApiResponse<Vec<MovieDto>>>, ApiError> {
    let query = request.query.unwrap_or_default();

    let movies = if query.trim().is_empty() {
        state.search_service().browse().await?
    } else {
        state.search_service().search(&query).await?
    };

    Ok(Json(ApiResponse::success(
        movies.into_iter().map(MovieDto::from).collect(),
    )))
}
