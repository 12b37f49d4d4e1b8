use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use vaidyacare::domain::ports::SessionStoragePort;
use vaidyacare::domain::toast::Toast;
use vaidyacare::infrastructure::config::ConfigError;
use vaidyacare::infrastructure::{ApiClient, AppConfig, FileSessionStorage, StorageManager};
use vaidyacare::presentation::{App, Cli, Output, Ports};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

/// Loads config, falling back to defaults. The returned problem is reported
/// after logging starts.
fn load_config(cli: &Cli) -> (AppConfig, Option<StorageManager>, Option<ConfigError>) {
    let (mut config, manager, problem) = match StorageManager::new() {
        Ok(manager) => {
            let (config, problem) = manager.load_config_or_default(cli.args.config.as_deref());
            (config, Some(manager), problem)
        }
        Err(e) => (AppConfig::default(), None, Some(e)),
    };
    config.merge_with_args(&cli.args);
    (config, manager, problem)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let (config, manager, config_problem) = load_config(&cli);
    init_logging(&config)?;
    let output = Output::new(&config.output);

    if let Some(problem) = &config_problem {
        warn!(error = %problem, "Config not loaded, using defaults");
        output.toast(&Toast::info(format!("{problem}. Using default settings.")));
    }

    info!(
        version = vaidyacare::VERSION,
        base_url = %config.api.base_url,
        "Starting VaidyaCare"
    );

    let storage: Arc<dyn SessionStoragePort> = match &manager {
        Some(manager) => Arc::new(FileSessionStorage::new(manager.session_path())),
        None => {
            warn!("No data directory available, sessions will not be remembered");
            Arc::new(FileSessionStorage::disabled())
        }
    };

    let client = Arc::new(ApiClient::new(&config.api)?);
    let ports = Ports {
        auth: client.clone(),
        care: client.clone(),
        family: client.clone(),
        services: client,
        storage,
    };

    let app = App::new(ports, output.clone());

    if let Err(e) = app.run(cli.command).await {
        error!(error = %e, category = ?e.category(), "Command failed");
        output.toast(&Toast::from_error(&e));
        std::process::exit(1);
    }

    Ok(())
}
