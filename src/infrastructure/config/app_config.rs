//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::args::CliArgs;

pub(crate) const APP_NAME: &str = "vaidyacare";
pub(crate) const APP_QUALIFIER: &str = "in";
pub(crate) const APP_ORGANIZATION: &str = "vaidyacare";

/// Backend address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://192.168.1.5/vaidyacare/api";
/// Request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, read from `config.toml` and overridden by CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Backend connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// Terminal output.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Directory holding the PHP scripts.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Terminal output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Date format string (chrono format).
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Colour status badges and toasts.
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            color: true,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_date_format() -> String {
    "%d %b %Y".to_string()
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(base_url) = &args.base_url {
            self.api.base_url.clone_from(base_url);
        }
        if let Some(timeout) = args.timeout {
            self.api.timeout_secs = timeout;
        }
        if args.no_color {
            self.output.color = false;
        }
    }

    /// Returns default data directory, home of the session and log files.
    #[must_use]
    pub fn default_data_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        Self::default_data_dir().map(|dir| dir.join("vaidyacare.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: CliArgs,
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
            log_level = "debug"

            [api]
            base_url = "http://10.0.2.2/vaidyacare/api"
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.api.base_url, "http://10.0.2.2/vaidyacare/api");
        assert_eq!(config.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.output.color);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.output.date_format, "%d %b %Y");
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_args_override_file_values() {
        let mut config = AppConfig::default();
        let harness = Harness::parse_from([
            "vaidyacare",
            "--base-url",
            "http://localhost:8080/api",
            "--timeout",
            "5",
            "--no-color",
        ]);

        config.merge_with_args(&harness.args);

        assert_eq!(config.api.base_url, "http://localhost:8080/api");
        assert_eq!(config.api.timeout_secs, 5);
        assert!(!config.output.color);
        assert_eq!(config.log_level, LogLevel::Info);
    }
}
