use crate::config::settings::{ApiSettings, MirrorSettings, SourceMode};
use crate::core::api_aggregator::ApiAggregator;
use crate::core::mirror_aggregator::MirrorAggregator;
use crate::core::ConfigProvider;
use crate::domain::model::TrendFeed;
use crate::domain::ports::TrendSource;
use crate::utils::error::{Result, TrendError};
use async_trait::async_trait;

/// Backend chosen once at construction; every fetch goes to it unchanged.
pub enum TrendFetcher {
    Api(ApiAggregator),
    Mirror(MirrorAggregator),
}

impl TrendFetcher {
    /// API mode. Reads the bearer token from `settings.token_env` and fails
    /// before any network activity when it is absent.
    pub fn api(settings: ApiSettings) -> Result<Self> {
        Ok(Self::Api(ApiAggregator::from_env(settings)?))
    }

    pub fn api_with_token(token: Option<String>, settings: ApiSettings) -> Result<Self> {
        Ok(Self::Api(ApiAggregator::new(token, settings)?))
    }

    pub fn mirror(settings: MirrorSettings) -> Result<Self> {
        Ok(Self::Mirror(MirrorAggregator::new(settings)?))
    }

    /// Builds the configured backend. With `fallback_to_mirror`, only a missing
    /// credential switches to the mirror; invalid settings are still errors.
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        match config.source_mode() {
            SourceMode::Mirror => Self::mirror(config.mirror_settings().clone()),
            SourceMode::Api => match Self::api(config.api_settings().clone()) {
                Err(e @ TrendError::MissingConfigError { .. }) if config.fallback_to_mirror() => {
                    tracing::warn!("⚠️ {}; falling back to mirror mode", e);
                    Self::mirror(config.mirror_settings().clone())
                }
                other => other,
            },
        }
    }

    pub fn mode(&self) -> SourceMode {
        match self {
            TrendFetcher::Api(_) => SourceMode::Api,
            TrendFetcher::Mirror(_) => SourceMode::Mirror,
        }
    }
}

#[async_trait]
impl TrendSource for TrendFetcher {
    async fn fetch_trending(&self) -> Result<Option<TrendFeed>> {
        match self {
            TrendFetcher::Api(api) => api.fetch_trending().await,
            TrendFetcher::Mirror(mirror) => mirror.fetch_trending().await,
        }
    }
}
