use super::app_config::LogLevel;
use clap::Args;
use std::path::PathBuf;

/// Options accepted before or after any subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Backend API base URL.
    #[arg(long, value_name = "URL", env = "VAIDYACARE_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Disable coloured output.
    #[arg(long, global = true)]
    pub no_color: bool,
}
