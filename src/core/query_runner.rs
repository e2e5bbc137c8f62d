use crate::config::settings::ApiSettings;
use crate::core::extractor::extract_candidate;
use crate::domain::model::{ScoredCandidate, SearchResponse};
use crate::utils::error::{Result, TrendError};
use reqwest::{Client, StatusCode};

/// Issues one topical search request and scores what comes back.
///
/// Errors tell the caller what to do next: [`TrendError::aborts_query_loop`]
/// is true for 429 and 401, every other error only skips this query.
pub struct QueryRunner<'a> {
    client: &'a Client,
    bearer_token: &'a str,
    settings: &'a ApiSettings,
}

impl<'a> QueryRunner<'a> {
    pub fn new(client: &'a Client, bearer_token: &'a str, settings: &'a ApiSettings) -> Self {
        Self {
            client,
            bearer_token,
            settings,
        }
    }

    pub async fn run(&self, query: &str) -> Result<Vec<ScoredCandidate>> {
        let full_query = format!("{} {}", query, self.settings.query_suffix);
        let max_results = self.settings.max_results.to_string();

        tracing::debug!("Searching: {}", full_query);

        let response = self
            .client
            .get(&self.settings.search_endpoint)
            .bearer_auth(self.bearer_token)
            .query(&[
                ("query", full_query.as_str()),
                ("max_results", max_results.as_str()),
                ("tweet.fields", self.settings.tweet_fields.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Search API response status: {}", status);

        match status {
            StatusCode::OK => {
                let body: SearchResponse = serde_json::from_str(&response.text().await?)?;
                let posts = body.data.unwrap_or_default();

                let candidates: Vec<ScoredCandidate> = posts
                    .iter()
                    .filter_map(|post| {
                        extract_candidate(post, self.settings.engagement_threshold)
                    })
                    .collect();

                tracing::debug!(
                    "Query '{}' returned {} posts, {} candidates",
                    query,
                    posts.len(),
                    candidates.len()
                );
                Ok(candidates)
            }
            StatusCode::TOO_MANY_REQUESTS => Err(TrendError::RateLimited),
            StatusCode::UNAUTHORIZED => Err(TrendError::Unauthorized),
            other => {
                let text = response.text().await.unwrap_or_default();
                Err(TrendError::QueryFailure {
                    status: other.as_u16(),
                    detail: failure_detail(&text),
                })
            }
        }
    }
}

/// API 的 `detail` 欄位，否則取回應前 100 個字元
fn failure_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.chars().take(100).collect())
}
