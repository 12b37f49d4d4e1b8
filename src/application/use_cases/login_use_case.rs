//! Login use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{LoginRequest, LoginResponse, SessionSource};
use crate::domain::entities::Session;
use crate::domain::errors::ApiError;
use crate::domain::ports::{AuthPort, SessionStoragePort};

/// Handles patient and doctor sign-in and sign-out.
#[derive(Clone)]
pub struct LoginUseCase {
    auth_port: Arc<dyn AuthPort>,
    storage_port: Arc<dyn SessionStoragePort>,
}

impl LoginUseCase {
    /// Creates new login use case.
    #[must_use]
    pub const fn new(
        auth_port: Arc<dyn AuthPort>,
        storage_port: Arc<dyn SessionStoragePort>,
    ) -> Self {
        Self {
            auth_port,
            storage_port,
        }
    }

    /// Executes login with provided request.
    ///
    /// # Errors
    /// Returns error if the call fails or the server rejects the credentials.
    pub async fn execute(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        debug!(role = %request.role, login_id = %request.login_id, "Attempting login");

        let session = self
            .auth_port
            .login(request.role, &request.login_id, &request.password)
            .await
            .map_err(|e| {
                warn!(error = %e, "Login failed");
                e
            })?;

        info!(
            user_id = %session.user_id,
            role = %session.role,
            "Successfully signed in"
        );

        let persisted = if request.persist_session {
            persist(self.storage_port.as_ref(), &session).await
        } else {
            debug!("Session persistence disabled, skipping storage");
            false
        };

        Ok(LoginResponse::new(session, SessionSource::SignedIn, persisted))
    }

    /// Deletes the stored session.
    ///
    /// # Errors
    /// Returns error if deletion fails.
    pub async fn logout(&self) -> Result<(), ApiError> {
        debug!("Clearing stored session");
        match self.storage_port.clear_session().await {
            Ok(()) => {
                info!("Signed out");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to clear stored session");
                Err(e.into())
            }
        }
    }
}

/// Writes the session to the store. A failure is logged, not raised: the
/// user stays signed in for this run.
pub(crate) async fn persist(storage: &dyn SessionStoragePort, session: &Session) -> bool {
    match storage.store_session(session).await {
        Ok(()) => {
            info!("Session persisted");
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to persist session");
            false
        }
    }
}
