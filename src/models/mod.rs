pub mod metric;
pub mod movie;

pub use metric::{NewSearchMetric, SearchMetric};
pub use movie::Movie;
