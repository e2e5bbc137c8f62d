pub mod api_aggregator;
pub mod extractor;
pub mod fetcher;
pub mod mirror_aggregator;
pub mod mirror_scraper;
pub mod query_runner;

pub use crate::domain::model::{ScoredCandidate, TrendFeed, TrendItem};
pub use crate::domain::ports::{ConfigProvider, CrawlJob, TrendSource};
pub use crate::utils::error::Result;
