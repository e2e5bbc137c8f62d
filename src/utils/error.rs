use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrendError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Search API rate limit reached")]
    RateLimited,

    #[error("Search API rejected the bearer token")]
    Unauthorized,

    #[error("Search query failed ({status}): {detail}")]
    QueryFailure { status: u16, detail: String },

    #[error("Mirror instance {instance} failed: {message}")]
    InstanceFailure { instance: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Upstream,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TrendError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TrendError::ConfigError { .. }
            | TrendError::MissingConfigError { .. }
            | TrendError::InvalidConfigValueError { .. }
            | TrendError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            TrendError::ApiError(_) | TrendError::InstanceFailure { .. } => ErrorCategory::Network,
            TrendError::RateLimited
            | TrendError::Unauthorized
            | TrendError::QueryFailure { .. } => ErrorCategory::Upstream,
            TrendError::SerializationError(_) | TrendError::CsvError(_) => ErrorCategory::Data,
            TrendError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Network | ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 是否屬於配置錯誤（建構時即失敗，不會發出任何網路請求）
    pub fn is_configuration(&self) -> bool {
        match self {
            TrendError::IoError(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => self.category() == ErrorCategory::Configuration,
        }
    }

    /// 429 與 401 會中止本輪剩餘的查詢
    pub fn aborts_query_loop(&self) -> bool {
        matches!(self, TrendError::RateLimited | TrendError::Unauthorized)
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TrendError::MissingConfigError { .. } => {
                "Set the missing value (for API mode export X_API_BEARER_TOKEN) or switch to mirror mode"
            }
            TrendError::ConfigError { .. }
            | TrendError::InvalidConfigValueError { .. }
            | TrendError::ConfigValidationError { .. } => {
                "Check the configuration file and environment variables"
            }
            TrendError::RateLimited => "Wait for the rate limit window to reset or use the mirror backend",
            TrendError::Unauthorized => "Verify that the bearer token is valid and has search access",
            TrendError::QueryFailure { .. } | TrendError::ApiError(_) => {
                "Retry later; the search API may be temporarily unavailable"
            }
            TrendError::InstanceFailure { .. } => "Try another mirror instance",
            TrendError::SerializationError(_) | TrendError::CsvError(_) => {
                "The upstream response format may have changed"
            }
            TrendError::IoError(_) => "Check file paths and permissions",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Network => format!("Network problem: {}", self),
            ErrorCategory::Upstream => format!("Search API problem: {}", self),
            ErrorCategory::Data => format!("Unexpected data: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrendError>;
