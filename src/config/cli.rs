use crate::config::settings::SourceMode;
use crate::config::toml_config::TomlConfig;
use crate::utils::error::Result;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "trend-fetch")]
#[command(about = "Fetch trending topics from the search API or an HTML mirror")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the source mode from config (api or mirror)
    #[arg(long)]
    pub mode: Option<String>,

    /// Fall back to mirror mode when the API credential is missing
    #[arg(long)]
    pub fallback_to_mirror: bool,

    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 載入 TOML（若有指定）並套用命令列覆蓋設定
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(mode) = &self.mode {
            let mode: SourceMode = mode.parse().map_err(|reason| {
                crate::utils::error::TrendError::InvalidConfigValueError {
                    field: "--mode".to_string(),
                    value: mode.clone(),
                    reason,
                }
            })?;
            tracing::info!("🔧 Source mode overridden to: {:?}", mode);
            config.source.mode = mode;
        }

        if self.fallback_to_mirror {
            config.source.fallback_to_mirror = true;
        }

        Ok(config)
    }
}
