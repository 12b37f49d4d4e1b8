//! Infrastructure layer with external service adapters.

/// VaidyaCare backend client.
pub mod api;
/// Application configuration.
pub mod config;
/// Session storage adapters.
pub mod storage;

pub use api::ApiClient;
pub use config::{ApiConfig, AppConfig, CliArgs, LogLevel, OutputConfig, StorageManager};
pub use storage::FileSessionStorage;
