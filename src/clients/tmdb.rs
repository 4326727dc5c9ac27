use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;

use crate::config::TmdbConfig;
use crate::models::Movie;

#[derive(Debug, Deserialize)]
struct TmdbPage {
    results: Vec<Movie>,
}

#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    #[must_use]
    pub fn new(config: &TmdbConfig, client: Client) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    async fn get_page(&self, url: &str) -> Result<Vec<Movie>> {
        let response = self
            .client
            .get(url)
            .header("accept", "application/json")
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("TMDB API error: {} - {}", status, body));
        }

        let page: TmdbPage = response.json().await?;

        Ok(page.results)
    }

    pub async fn search_movies(&self, query: &str) -> Result<Vec<Movie>> {
        let url = format!(
            "{}/search/movie?query={}",
            self.base_url,
            urlencoding::encode(query)
        );
        self.get_page(&url).await
    }

    /// Popular movies, used when the UI has no query to search for.
    pub async fn discover_movies(&self) -> Result<Vec<Movie>> {
        let url = format!("{}/discover/movie?sort_by=popularity.desc", self.base_url);
        self.get_page(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = TmdbConfig {
            base_url: "https://api.themoviedb.org/3/".to_string(),
            api_key: "token".to_string(),
        };
        let client = TmdbClient::new(&config, Client::new());
        assert_eq!(client.base_url, "https://api.themoviedb.org/3");
    }

    #[test]
    fn test_page_envelope_decoding() {
        let json = r#"{
            "page": 1,
            "results": [
                {"id": 27205, "title": "Inception", "poster_path": "/inc.jpg",
                 "overview": "A thief who steals corporate secrets.",
                 "release_date": "2010-07-15", "vote_average": 8.4,
                 "original_language": "en"},
                {"id": 1, "title": "Obscure", "poster_path": null}
            ],
            "total_pages": 1,
            "total_results": 2
        }"#;

        let page: TmdbPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].id, 27205);
        assert_eq!(page.results[1].poster_path, None);
        assert_eq!(page.results[1].overview, None);
    }
}
