pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, OutputFormat};

pub use app::{handle_invocation, InvocationResponse, TrendCrawl};
pub use config::{ApiSettings, EnvConfig, MirrorSettings, SourceMode, TomlConfig};
pub use core::fetcher::TrendFetcher;
pub use domain::model::{TrendFeed, TrendItem};
pub use domain::ports::{ConfigProvider, CrawlJob, TrendSource};
pub use utils::error::{Result, TrendError};
