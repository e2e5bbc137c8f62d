use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url,
    validate_url_list, Validate,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_TOKEN_ENV: &str = "X_API_BEARER_TOKEN";
/// 每輪最多查詢數（外部頻率限制）
pub const MAX_QUERIES_PER_RUN: usize = 3;
pub const MAX_FEED_ITEMS: usize = 20;
pub const MAX_SCANNED_ELEMENTS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    #[default]
    Api,
    Mirror,
}

impl std::str::FromStr for SourceMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "api" => Ok(SourceMode::Api),
            "mirror" | "nitter" => Ok(SourceMode::Mirror),
            other => Err(format!("unknown source mode: {}", other)),
        }
    }
}

/// Search API tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub search_endpoint: String,
    /// 讀取 bearer token 的環境變數名稱
    pub token_env: String,
    pub queries: Vec<String>,
    pub max_queries: usize,
    pub max_results: u32,
    pub query_suffix: String,
    pub tweet_fields: String,
    pub engagement_threshold: f64,
    pub query_delay_ms: u64,
    pub max_items: usize,
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            search_endpoint: "https://api.twitter.com/2/tweets/search/recent".to_string(),
            token_env: DEFAULT_TOKEN_ENV.to_string(),
            queries: vec![
                "AI OR ChatGPT OR OpenAI".to_string(),
                "Bitcoin OR Crypto OR Blockchain".to_string(),
                "Tesla OR SpaceX OR Elon Musk".to_string(),
                "breaking news".to_string(),
                "trending".to_string(),
            ],
            max_queries: 3,
            max_results: 10,
            query_suffix: "lang:en -is:retweet".to_string(),
            tweet_fields: "public_metrics,created_at,entities,text".to_string(),
            engagement_threshold: 20.0,
            query_delay_ms: 1000,
            max_items: 20,
            timeout_secs: 10,
        }
    }
}

impl ApiSettings {
    pub fn query_delay(&self) -> Duration {
        Duration::from_millis(self.query_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn item_limit(&self) -> usize {
        self.max_items.min(MAX_FEED_ITEMS)
    }

    /// 本輪實際會執行的查詢
    pub fn active_queries(&self) -> &[String] {
        let n = self
            .max_queries
            .min(MAX_QUERIES_PER_RUN)
            .min(self.queries.len());
        &self.queries[..n]
    }
}

impl Validate for ApiSettings {
    fn validate(&self) -> Result<()> {
        validate_url("api.search_endpoint", &self.search_endpoint)?;
        validate_non_empty_string("api.token_env", &self.token_env)?;
        validate_positive_number("api.queries", self.queries.len(), 1)?;
        validate_range("api.max_queries", self.max_queries, 1, MAX_QUERIES_PER_RUN)?;
        // search/recent 只接受 10..=100
        validate_range("api.max_results", self.max_results, 10, 100)?;
        validate_range("api.engagement_threshold", self.engagement_threshold, 0.0, f64::MAX)?;
        validate_range("api.max_items", self.max_items, 1, MAX_FEED_ITEMS)?;
        validate_range("api.timeout_secs", self.timeout_secs, 1, 300)?;
        Ok(())
    }
}

/// HTML mirror tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorSettings {
    pub instances: Vec<String>,
    pub trending_path: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub max_elements: usize,
}

impl Default for MirrorSettings {
    fn default() -> Self {
        Self {
            instances: vec![
                "https://nitter.net".to_string(),
                "https://nitter.it".to_string(),
                "https://nitter.pussthecat.org".to_string(),
            ],
            trending_path: "/trending".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
                .to_string(),
            timeout_secs: 10,
            max_elements: 20,
        }
    }
}

impl MirrorSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn element_limit(&self) -> usize {
        self.max_elements.min(MAX_SCANNED_ELEMENTS)
    }
}

impl Validate for MirrorSettings {
    fn validate(&self) -> Result<()> {
        validate_url_list("mirror.instances", &self.instances)?;
        validate_non_empty_string("mirror.trending_path", &self.trending_path)?;
        validate_non_empty_string("mirror.user_agent", &self.user_agent)?;
        validate_range("mirror.timeout_secs", self.timeout_secs, 1, 300)?;
        validate_range("mirror.max_elements", self.max_elements, 1, MAX_SCANNED_ELEMENTS)?;
        Ok(())
    }
}
