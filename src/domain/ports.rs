use crate::config::settings::{ApiSettings, MirrorSettings, SourceMode};
use crate::domain::model::TrendFeed;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn source_mode(&self) -> SourceMode;
    fn api_settings(&self) -> &ApiSettings;
    fn mirror_settings(&self) -> &MirrorSettings;

    /// API 模式建構失敗（缺少憑證）時是否改用鏡像站
    fn fallback_to_mirror(&self) -> bool {
        false
    }
}

/// A backend that can produce a trends-like feed. `Ok(None)` means "no data".
#[async_trait]
pub trait TrendSource: Send + Sync {
    async fn fetch_trending(&self) -> Result<Option<TrendFeed>>;
}

/// One crawl run, as invoked by the request-triggered entry point.
#[async_trait]
pub trait CrawlJob: Send + Sync {
    async fn run(&self) -> Result<String>;
}
