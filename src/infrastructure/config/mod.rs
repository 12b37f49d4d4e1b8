//! Application configuration.

pub mod app_config;
pub mod args;
pub mod storage;

pub use app_config::{
    ApiConfig, AppConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, LogLevel, OutputConfig,
};
pub use args::CliArgs;
pub use storage::{ConfigError, StorageManager};
