use crate::config::settings::{ApiSettings, MirrorSettings, SourceMode};
use crate::config::toml_config::TomlConfig;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, TrendError};
use crate::utils::validation::Validate;
use std::env;

/// Configuration assembled from environment variables, optionally layered
/// on top of a TOML file named by `TREND_CONFIG_PATH`.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub source_mode: SourceMode,
    pub fallback_to_mirror: bool,
    pub api: ApiSettings,
    pub mirror: MirrorSettings,
}

impl EnvConfig {
    pub fn from_env() -> Result<Self> {
        let base = match env::var("TREND_CONFIG_PATH") {
            Ok(path) if !path.trim().is_empty() => TomlConfig::from_file(path.trim())?,
            _ => TomlConfig::default(),
        };

        let mut config = Self {
            source_mode: base.source.mode,
            fallback_to_mirror: base.source.fallback_to_mirror,
            api: base.api,
            mirror: base.mirror,
        };

        if let Ok(mode) = env::var("TREND_SOURCE_MODE") {
            config.source_mode = mode.parse().map_err(|reason| {
                TrendError::InvalidConfigValueError {
                    field: "TREND_SOURCE_MODE".to_string(),
                    value: mode.clone(),
                    reason,
                }
            })?;
        }

        if let Ok(flag) = env::var("TREND_FALLBACK_TO_MIRROR") {
            config.fallback_to_mirror = parse_env("TREND_FALLBACK_TO_MIRROR", &flag)?;
        }

        if let Ok(instances) = env::var("TREND_MIRROR_INSTANCES") {
            config.mirror.instances = instances
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Ok(value) = env::var("TREND_MAX_QUERIES") {
            config.api.max_queries = parse_env("TREND_MAX_QUERIES", &value)?;
        }

        if let Ok(value) = env::var("TREND_QUERY_DELAY_MS") {
            config.api.query_delay_ms = parse_env("TREND_QUERY_DELAY_MS", &value)?;
        }

        if let Ok(value) = env::var("TREND_ENGAGEMENT_THRESHOLD") {
            config.api.engagement_threshold = parse_env("TREND_ENGAGEMENT_THRESHOLD", &value)?;
        }

        Ok(config)
    }
}

fn parse_env<T>(field: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| TrendError::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}

impl ConfigProvider for EnvConfig {
    fn source_mode(&self) -> SourceMode {
        self.source_mode
    }

    fn api_settings(&self) -> &ApiSettings {
        &self.api
    }

    fn mirror_settings(&self) -> &MirrorSettings {
        &self.mirror
    }

    fn fallback_to_mirror(&self) -> bool {
        self.fallback_to_mirror
    }
}

impl Validate for EnvConfig {
    fn validate(&self) -> Result<()> {
        if self.source_mode == SourceMode::Api {
            self.api.validate()?;
        }
        if self.source_mode == SourceMode::Mirror || self.fallback_to_mirror {
            self.mirror.validate()?;
        }
        tracing::debug!("✅ Environment configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_values() {
        let delay: u64 = parse_env("TREND_QUERY_DELAY_MS", " 250 ").unwrap();
        assert_eq!(delay, 250);

        let flag: bool = parse_env("TREND_FALLBACK_TO_MIRROR", "true").unwrap();
        assert!(flag);

        let err = parse_env::<usize>("TREND_MAX_QUERIES", "three").unwrap_err();
        assert!(matches!(err, TrendError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_mirror_mode_validates_mirror_settings_only() {
        let config = EnvConfig {
            source_mode: SourceMode::Mirror,
            fallback_to_mirror: false,
            api: ApiSettings {
                search_endpoint: "not a url".to_string(),
                ..ApiSettings::default()
            },
            mirror: MirrorSettings::default(),
        };
        assert!(config.validate().is_ok());
    }
}
