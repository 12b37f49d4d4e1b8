//! Session storage port definition.

use async_trait::async_trait;

use crate::domain::entities::Session;
use crate::domain::errors::StorageError;

/// Port for the local session store.
#[async_trait]
pub trait SessionStoragePort: Send + Sync {
    /// Retrieves the stored session.
    async fn get_session(&self) -> Result<Option<Session>, StorageError>;

    /// Stores the session, replacing any previous one.
    async fn store_session(&self, session: &Session) -> Result<(), StorageError>;

    /// Deletes the stored session.
    async fn clear_session(&self) -> Result<(), StorageError>;

    /// Checks if a session exists.
    async fn has_session(&self) -> Result<bool, StorageError> {
        Ok(self.get_session().await?.is_some())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory session storage for testing.
    pub struct MockSessionStorage {
        session: Arc<RwLock<Option<Session>>>,
    }

    impl MockSessionStorage {
        /// Creates empty mock storage.
        pub fn new() -> Self {
            Self {
                session: Arc::new(RwLock::new(None)),
            }
        }

        /// Creates mock storage holding a session.
        pub fn with_session(session: Session) -> Self {
            Self {
                session: Arc::new(RwLock::new(Some(session))),
            }
        }
    }

    impl Default for MockSessionStorage {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl SessionStoragePort for MockSessionStorage {
        async fn get_session(&self) -> Result<Option<Session>, StorageError> {
            Ok(self.session.read().await.clone())
        }

        async fn store_session(&self, session: &Session) -> Result<(), StorageError> {
            *self.session.write().await = Some(session.clone());
            Ok(())
        }

        async fn clear_session(&self) -> Result<(), StorageError> {
            *self.session.write().await = None;
            Ok(())
        }
    }
}
