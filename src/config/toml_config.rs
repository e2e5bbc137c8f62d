use crate::config::settings::{ApiSettings, MirrorSettings, SourceMode};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, TrendError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub mirror: MirrorSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub mode: SourceMode,
    #[serde(default)]
    pub fallback_to_mirror: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TrendError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TrendError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MIRROR_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        Self::substitute_vars(content, |name| std::env::var(name).ok())
    }

    fn substitute_vars<F>(content: &str, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TrendError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn source_mode(&self) -> SourceMode {
        self.source.mode
    }

    fn api_settings(&self) -> &ApiSettings {
        &self.api
    }

    fn mirror_settings(&self) -> &MirrorSettings {
        &self.mirror
    }

    fn fallback_to_mirror(&self) -> bool {
        self.source.fallback_to_mirror
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        // 只驗證會用到的後端；允許 fallback 時兩者都要驗證
        if self.source.mode == SourceMode::Api {
            self.api.validate()?;
        }
        if self.source.mode == SourceMode::Mirror || self.source.fallback_to_mirror {
            self.mirror.validate()?;
        }
        Ok(())
    }
}
