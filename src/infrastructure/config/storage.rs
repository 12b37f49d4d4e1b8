use super::app_config::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, AppConfig};
use directories::ProjectDirs;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const CONFIG_FILE_NAME: &str = "config.toml";
const SESSION_FILE_NAME: &str = "session.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no home directory to keep VaidyaCare files in")]
    NoProjectDirs,
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not valid config: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("cannot encode config: {0}")]
    Encode(#[from] toml::ser::Error),
}

impl ConfigError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Knows where `config.toml` and `session.toml` live.
pub struct StorageManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl StorageManager {
    /// Resolves the platform config and data directories.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoProjectDirs` when no home directory is known.
    pub fn new() -> Result<Self, ConfigError> {
        let dirs = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .ok_or(ConfigError::NoProjectDirs)?;

        Ok(Self {
            config_dir: dirs.config_dir().to_path_buf(),
            data_dir: dirs.data_dir().to_path_buf(),
        })
    }

    /// Keeps both files under `path`.
    #[must_use]
    pub fn with_dir(path: PathBuf) -> Self {
        Self {
            data_dir: path.clone(),
            config_dir: path,
        }
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    #[must_use]
    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join(SESSION_FILE_NAME)
    }

    /// Reads `config.toml`, or `path_override` when given.
    ///
    /// A missing file is created with defaults. A malformed file is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Malformed` if the file is not valid TOML, or
    /// another `ConfigError` if it cannot be read or the default cannot be
    /// written.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let path = path_override.map_or_else(|| self.config_path(), Path::to_path_buf);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "Writing default config");
                let config = AppConfig::default();
                write_atomic(&path, &config)?;
                return Ok(config);
            }
            Err(e) => return Err(ConfigError::io(&path, e)),
        };

        toml::from_str::<AppConfig>(&content).map_err(|source| ConfigError::Malformed { path, source })
    }

    /// Like [`Self::load_config`], but falls back to defaults and hands the
    /// failure back so it can be reported once logging is up.
    #[must_use]
    pub fn load_config_or_default(
        &self,
        path_override: Option<&Path>,
    ) -> (AppConfig, Option<ConfigError>) {
        match self.load_config(path_override) {
            Ok(config) => (config, None),
            Err(e) => (AppConfig::default(), Some(e)),
        }
    }
}

fn write_atomic<T: serde::Serialize>(path: &Path, data: &T) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(data)?;

    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;

    let mut file = tempfile::NamedTempFile::new_in(parent).map_err(|e| ConfigError::io(parent, e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| ConfigError::io(path, e))?;
    file.persist(path).map_err(|e| ConfigError::io(path, e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_is_written_with_defaults() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().join("nested"));

        let config = manager.load_config(None).unwrap();
        assert!(config.output.color);

        let written = fs::read_to_string(manager.config_path()).unwrap();
        assert!(written.contains("base_url"));
        assert!(written.contains("timeout_secs"));
    }

    #[test]
    fn test_malformed_config_is_left_alone() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        fs::write(manager.config_path(), "log_level = [").unwrap();

        let err = manager.load_config(None).unwrap_err();

        assert!(matches!(err, ConfigError::Malformed { .. }));
        let content = fs::read_to_string(manager.config_path()).unwrap();
        assert_eq!(content, "log_level = [");
    }

    #[test]
    fn test_unreadable_config_is_an_error() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        fs::create_dir(manager.config_path()).unwrap();

        let err = manager.load_config(None).unwrap_err();

        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_malformed_config_falls_back_with_error() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        fs::write(manager.config_path(), "[api]\ntimeout_secs = \"soon\"\n").unwrap();

        let (config, problem) = manager.load_config_or_default(None);

        assert_eq!(config.api.timeout_secs, 30);
        assert!(matches!(problem, Some(ConfigError::Malformed { .. })));
    }

    #[test]
    fn test_valid_config_reports_no_problem() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        fs::write(manager.config_path(), "log_level = \"debug\"\n").unwrap();

        let (config, problem) = manager.load_config_or_default(None);

        assert_eq!(config.log_level.to_string(), "debug");
        assert!(problem.is_none());
    }

    #[test]
    fn test_override_path_is_read() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().join("unused"));
        let custom = dir.path().join("clinic.toml");
        fs::write(&custom, "[api]\nbase_url = \"http://10.0.0.7/api\"\n").unwrap();

        let config = manager.load_config(Some(&custom)).unwrap();

        assert_eq!(config.api.base_url, "http://10.0.0.7/api");
        assert!(!manager.config_path().exists());
    }

    #[test]
    fn test_session_lives_beside_config_when_rooted() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        assert_eq!(manager.session_path(), dir.path().join("session.toml"));
    }
}
