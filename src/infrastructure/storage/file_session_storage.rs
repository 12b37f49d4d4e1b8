//! TOML file session storage.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};

use crate::domain::entities::Session;
use crate::domain::errors::StorageError;
use crate::domain::ports::SessionStoragePort;

/// Keeps the signed-in account's identifiers in `session.toml`.
pub struct FileSessionStorage {
    path: Option<PathBuf>,
}

impl FileSessionStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Storage that remembers nothing, for when no data directory exists.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { path: None }
    }

    fn path(&self) -> Result<&Path, StorageError> {
        self.path
            .as_deref()
            .ok_or_else(|| StorageError::NotAvailable("no data directory".to_string()))
    }
}

#[async_trait]
impl SessionStoragePort for FileSessionStorage {
    async fn get_session(&self) -> Result<Option<Session>, StorageError> {
        let Some(path) = &self.path else {
            return Ok(None);
        };

        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No stored session");
                return Ok(None);
            }
            Err(e) => {
                warn!(error = %e, "Failed to read session file");
                return Err(StorageError::ReadFailed(e.to_string()));
            }
        };

        match toml::from_str::<Session>(&content) {
            Ok(session) => {
                debug!(user_id = %session.user_id, role = %session.role, "Session found");
                Ok(Some(session))
            }
            Err(e) => {
                warn!(error = %e, "Discarding unreadable session file");
                Ok(None)
            }
        }
    }

    async fn store_session(&self, session: &Session) -> Result<(), StorageError> {
        let path = self.path()?;
        let content =
            toml::to_string(session).map_err(|e| StorageError::WriteFailed(e.to_string()))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        }

        // Write beside the target and rename so a crash never leaves half a file.
        let staging = path.with_extension("toml.tmp");
        fs::write(&staging, content)
            .await
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        fs::rename(&staging, path).await.map_err(|e| {
            warn!(error = %e, "Failed to store session");
            StorageError::WriteFailed(e.to_string())
        })?;

        debug!(user_id = %session.user_id, "Session stored");
        Ok(())
    }

    async fn clear_session(&self) -> Result<(), StorageError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        match fs::remove_file(path).await {
            Ok(()) => {
                debug!("Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                warn!(error = %e, "Failed to clear session");
                Err(StorageError::ClearFailed(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Role, UserId};
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_store_load_and_clear() {
        let dir = tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("nested").join("session.toml"));
        let session = Session::new(Role::Patient, UserId(42), "Asha")
            .with_contact("asha@example.com", "9800000000");

        assert!(storage.get_session().await.unwrap().is_none());

        storage.store_session(&session).await.unwrap();
        assert_eq!(storage.get_session().await.unwrap(), Some(session));
        assert!(storage.has_session().await.unwrap());

        storage.clear_session().await.unwrap();
        assert!(!storage.has_session().await.unwrap());
        storage.clear_session().await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_signed_out() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "role = [").unwrap();

        let storage = FileSessionStorage::new(path);
        assert!(storage.get_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_disabled_storage_refuses_writes() {
        let storage = FileSessionStorage::disabled();
        let session = Session::new(Role::Doctor, UserId(1), "Meera");

        assert!(storage.get_session().await.unwrap().is_none());
        assert!(matches!(
            storage.store_session(&session).await,
            Err(StorageError::NotAvailable(_))
        ));
    }
}
