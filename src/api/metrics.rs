use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, TrendingDto};
use crate::constants::limits::{DEFAULT_TRENDING_LIMIT, MAX_TRENDING_LIMIT};

#[derive(Debug, Deserialize)]
pub struct TrendingRequest {
    pub limit: Option<usize>,
}

/// `GET /api/metrics/trending?limit=`
pub async fn trending(
    State(state): State<Arc<AppState>>,
    Query(request): Query<TrendingRequest>,
) -> Result<Json<ApiResponse<Vec<TrendingDto>>>, ApiError> {
    let service = state
        .metrics_service()
        .ok_or_else(|| ApiError::not_implemented("Search metrics"))?;

    let limit = request.limit.unwrap_or(DEFAULT_TRENDING_LIMIT);
    if limit == 0 || limit > MAX_TRENDING_LIMIT {
        return Err(ApiError::validation(format!(
            "limit must be between 1 and {}",
            MAX_TRENDING_LIMIT
        )));
    }

    let rows = service.trending(limit).await?;

    Ok(Json(ApiResponse::success(
        rows.into_iter().map(TrendingDto::from).collect(),
    )))
}
