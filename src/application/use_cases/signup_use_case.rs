//! Account registration use case.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::login_use_case::persist;
use crate::application::dto::{LoginResponse, SessionSource};
use crate::domain::errors::ApiError;
use crate::domain::ports::{AuthPort, DoctorSignup, PatientSignup, SessionStoragePort};

/// Registers patient and doctor accounts and signs them in.
#[derive(Clone)]
pub struct SignupUseCase {
    auth_port: Arc<dyn AuthPort>,
    storage_port: Arc<dyn SessionStoragePort>,
}

impl SignupUseCase {
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

    /// Registers a patient.
    ///
    /// # Errors
    /// Returns error if the call fails or the server rejects the form.
    pub async fn register_patient(&self, form: &PatientSignup) -> Result<LoginResponse, ApiError> {
        debug!(email = %form.email, "Registering patient");
        let session = self.auth_port.signup_patient(form).await.map_err(|e| {
            warn!(error = %e, "Patient signup failed");
            e
        })?;
        info!(user_id = %session.user_id, "Patient account created");

        let persisted = persist(self.storage_port.as_ref(), &session).await;
        Ok(LoginResponse::new(session, SessionSource::SignedIn, persisted))
    }

    /// Registers a doctor.
    ///
    /// # Errors
    /// Returns error if the call fails or the server rejects the form.
    pub async fn register_doctor(&self, form: &DoctorSignup) -> Result<LoginResponse, ApiError> {
        debug!(email = %form.email, specialization = %form.specialization, "Registering doctor");
        let session = self.auth_port.signup_doctor(form).await.map_err(|e| {
            warn!(error = %e, "Doctor signup failed");
            e
        })?;
        info!(user_id = %session.user_id, "Doctor account created");

        let persisted = persist(self.storage_port.as_ref(), &session).await;
        Ok(LoginResponse::new(session, SessionSource::SignedIn, persisted))
    }
}
