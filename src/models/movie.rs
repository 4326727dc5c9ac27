use serde::{Deserialize, Serialize};

use crate::constants::POSTER_IMAGE_BASE;

/// A movie as returned by the metadata provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,

    pub title: String,

    pub poster_path: Option<String>,

    pub overview: Option<String>,

    pub release_date: Option<String>,

    pub vote_average: Option<f64>,

    pub original_language: Option<String>,
}

impl Movie {
    /// Full poster URL: the fixed image-host prefix concatenated with the
    /// provider's poster path. A missing path yields the bare prefix; the
    /// path is never validated.
    #[must_use]
    pub fn poster_url(&self) -> String {
        format!(
            "{}{}",
            POSTER_IMAGE_BASE,
            self.poster_path.as_deref().unwrap_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(poster_path: Option<&str>) -> Movie {
        Movie {
            id: 550,
            title: "Fight Club".to_string(),
            poster_path: poster_path.map(ToString::to_string),
            overview: None,
            release_date: None,
            vote_average: None,
            original_language: None,
        }
    }

    #[test]
    fn test_poster_url_concatenation() {
        let m = movie(Some("/abc123.jpg"));
        assert_eq!(m.poster_url(), "https://image.tmdb.org/t/p/w500/abc123.jpg");
    }

    #[test]
    fn test_poster_url_without_path() {
        let m = movie(None);
        assert_eq!(m.poster_url(), "https://image.tmdb.org/t/p/w500");
    }
}
