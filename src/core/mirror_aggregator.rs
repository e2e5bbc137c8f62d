use crate::config::settings::MirrorSettings;
use crate::core::mirror_scraper::MirrorScraper;
use crate::domain::model::TrendFeed;
use crate::domain::ports::TrendSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Mutex;

/// Tries mirror instances in configured order; the first non-empty page wins.
pub struct MirrorAggregator {
    scraper: MirrorScraper,
    // 僅供診斷，不影響下次嘗試的順序
    current_instance: Mutex<Option<String>>,
}

impl MirrorAggregator {
    pub fn new(settings: MirrorSettings) -> Result<Self> {
        Ok(Self {
            scraper: MirrorScraper::new(settings)?,
            current_instance: Mutex::new(None),
        })
    }

    /// The instance that produced the last successful result, if any.
    pub fn current_instance(&self) -> Option<String> {
        self.current_instance
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }

    fn remember(&self, instance: &str) {
        if let Ok(mut guard) = self.current_instance.lock() {
            *guard = Some(instance.to_string());
        }
    }
}

#[async_trait]
impl TrendSource for MirrorAggregator {
    async fn fetch_trending(&self) -> Result<Option<TrendFeed>> {
        for instance in &self.scraper.settings().instances {
            match self.scraper.scrape(instance).await {
                Ok(items) if !items.is_empty() => {
                    tracing::info!("🪞 Mirror {} produced {} items", instance, items.len());
                    self.remember(instance);
                    return Ok(TrendFeed::from_items(items));
                }
                Ok(_) => {
                    tracing::warn!("⚠️ Mirror {} returned no trend items", instance);
                }
                Err(e) => {
                    tracing::warn!("⚠️ {}", e);
                }
            }
        }

        tracing::warn!("All mirror instances are unavailable");
        Ok(None)
    }
}
