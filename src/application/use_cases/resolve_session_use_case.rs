//! Session resolution use case.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::dto::SessionSource;
use crate::domain::entities::{Role, Session};
use crate::domain::errors::ApiError;
use crate::domain::ports::SessionStoragePort;

/// Looks up the signed-in account for screens that need one.
#[derive(Clone)]
pub struct ResolveSessionUseCase {
    storage_port: Arc<dyn SessionStoragePort>,
}

impl ResolveSessionUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(storage_port: Arc<dyn SessionStoragePort>) -> Self {
        Self { storage_port }
    }

    /// Resolves the stored session, if any.
    ///
    /// # Errors
    /// Returns error if storage access fails.
    pub async fn execute(&self) -> Result<Option<(Session, SessionSource)>, ApiError> {
        debug!("Checking session store");
        match self.storage_port.get_session().await? {
            Some(session) => {
                info!(user_id = %session.user_id, role = %session.role, "Using saved session");
                Ok(Some((session, SessionSource::Stored)))
            }
            None => {
                debug!("No saved session");
                Ok(None)
            }
        }
    }

    /// Returns the stored session or [`ApiError::NotSignedIn`].
    ///
    /// # Errors
    /// Returns error if nobody is signed in or storage access fails.
    pub async fn require(&self) -> Result<Session, ApiError> {
        self.storage_port
            .get_session()
            .await?
            .ok_or(ApiError::NotSignedIn)
    }

    /// Like [`Self::require`], and additionally checks the account kind.
    ///
    /// # Errors
    /// Returns error if nobody is signed in or the account has another role.
    pub async fn require_role(&self, role: Role) -> Result<Session, ApiError> {
        let session = self.require().await?;
        if session.role == role {
            Ok(session)
        } else {
            Err(ApiError::WrongRole {
                expected: role.as_str(),
            })
        }
    }
}
