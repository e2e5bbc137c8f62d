use crate::config::settings::{ApiSettings, MAX_FEED_ITEMS};
use crate::core::query_runner::QueryRunner;
use crate::domain::model::{ScoredCandidate, TrendFeed, TrendItem};
use crate::domain::ports::TrendSource;
use crate::utils::error::Result;
use crate::utils::validation::{validate_required_field, Validate};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashSet;

/// Synthesizes a trends feed from the search API.
pub struct ApiAggregator {
    client: Client,
    bearer_token: String,
    settings: ApiSettings,
}

impl ApiAggregator {
    /// Fails fast when the credential is missing or blank.
    pub fn new(bearer_token: Option<String>, settings: ApiSettings) -> Result<Self> {
        let bearer_token = bearer_token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        let bearer_token = validate_required_field(&settings.token_env, &bearer_token)?.clone();
        settings.validate()?;

        let client = Client::builder().timeout(settings.timeout()).build()?;

        Ok(Self {
            client,
            bearer_token,
            settings,
        })
    }

    /// 從 `settings.token_env` 指定的環境變數讀取憑證
    pub fn from_env(settings: ApiSettings) -> Result<Self> {
        let token = std::env::var(&settings.token_env).ok();
        Self::new(token, settings)
    }

    /// Runs the bounded query prefix in order and collects every candidate.
    /// A rate-limit or auth failure ends the loop; what was gathered so far is kept.
    pub async fn collect_candidates(&self) -> Vec<ScoredCandidate> {
        let runner = QueryRunner::new(&self.client, &self.bearer_token, &self.settings);
        let mut candidates = Vec::new();

        for query in self.settings.active_queries() {
            match runner.run(query).await {
                Ok(mut found) => {
                    candidates.append(&mut found);
                    // 避免請求過快觸發頻率限制
                    tokio::time::sleep(self.settings.query_delay()).await;
                }
                Err(e) if e.aborts_query_loop() => {
                    tracing::warn!("⛔ Search aborted at '{}': {}", query, e);
                    tracing::warn!("💡 {}", e.recovery_suggestion());
                    break;
                }
                Err(e) => {
                    tracing::warn!("⚠️ Query '{}' skipped: {}", query, e);
                    continue;
                }
            }
        }

        candidates
    }
}

#[async_trait]
impl TrendSource for ApiAggregator {
    async fn fetch_trending(&self) -> Result<Option<TrendFeed>> {
        let candidates = self.collect_candidates().await;
        let total = candidates.len();

        let items = finalize(candidates, self.settings.item_limit());
        tracing::info!("📈 Search API produced {} items from {} candidates", items.len(), total);

        let feed = TrendFeed::from_items(items);
        if feed.is_none() {
            tracing::warn!("No usable posts from the search API; permissions or queries may need adjusting");
        }
        Ok(feed)
    }
}

/// First occurrence of each case-insensitive trimmed title wins.
pub fn dedup_by_title(candidates: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.title.trim().to_lowercase()))
        .collect()
}

/// Stable, engagement descending.
pub fn rank_by_engagement(candidates: &mut [ScoredCandidate]) {
    candidates.sort_by(|a, b| b.engagement.total_cmp(&a.engagement));
}

/// dedup → rank → truncate → strip engagement
pub fn finalize(candidates: Vec<ScoredCandidate>, max_items: usize) -> Vec<TrendItem> {
    let mut unique = dedup_by_title(candidates);
    rank_by_engagement(&mut unique);
    unique.truncate(max_items.min(MAX_FEED_ITEMS));
    unique.into_iter().map(ScoredCandidate::into_item).collect()
}
