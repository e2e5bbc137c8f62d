use crate::core::fetcher::TrendFetcher;
use crate::core::{ConfigProvider, CrawlJob, TrendFeed, TrendSource};
use crate::utils::error::Result;
use async_trait::async_trait;

/// One crawl run: build the fetcher from configuration, fetch once.
pub struct TrendCrawl<C: ConfigProvider> {
    config: C,
}

impl<C: ConfigProvider> TrendCrawl<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }

    pub async fn fetch(&self) -> Result<Option<TrendFeed>> {
        let fetcher = TrendFetcher::from_config(&self.config)?;
        tracing::info!("🚀 Fetching trends via {:?} backend", fetcher.mode());
        fetcher.fetch_trending().await
    }
}

#[async_trait]
impl<C: ConfigProvider> CrawlJob for TrendCrawl<C> {
    async fn run(&self) -> Result<String> {
        let message = match self.fetch().await? {
            Some(feed) => format!("Crawl completed: {} trending items", feed.len()),
            // 沒有資料不是錯誤，交由呼叫端決定是否需要告警
            None => "Crawl completed: no trending data right now".to_string(),
        };
        tracing::info!("✅ {}", message);
        Ok(message)
    }
}
