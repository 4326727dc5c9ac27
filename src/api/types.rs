use serde::{Deserialize, Serialize};

use crate::models::{Movie, SearchMetric};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MovieDto {
    pub id: i64,
    pub title: String,
    pub poster_url: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub original_language: Option<String>,
}

impl From<Movie> for MovieDto {
    fn from(movie: Movie) -> Self {
        let poster_url = movie.poster_path.is_some().then(|| movie.poster_url());
        Self {
            id: movie.id,
            title: movie.title,
            poster_url,
            overview: movie.overview,
            release_date: movie.release_date,
            vote_average: movie.vote_average,
            original_language: movie.original_language,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrendingDto {
    pub search_term: String,
    pub count: i64,
    pub movie_id: i64,
    pub poster_url: String,
}

impl From<SearchMetric> for TrendingDto {
    fn from(metric: SearchMetric) -> Self {
        Self {
            search_term: metric.search_term,
            count: metric.count,
            movie_id: metric.movie_id,
            poster_url: metric.poster_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime: u64,
    pub search_metrics_enabled: bool,
}
