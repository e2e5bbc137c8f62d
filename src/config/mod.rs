#[cfg(feature = "cli")]
pub mod cli;
pub mod env;
pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, OutputFormat};
pub use env::EnvConfig;
pub use settings::{ApiSettings, MirrorSettings, SourceMode};
pub use toml_config::TomlConfig;
