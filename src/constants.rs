pub const POSTER_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

pub mod limits {

    pub const MAX_SEARCH_RESULTS: usize = 20;

    pub const DEFAULT_TRENDING_LIMIT: usize = 5;

    pub const MAX_TRENDING_LIMIT: usize = 20;
}
