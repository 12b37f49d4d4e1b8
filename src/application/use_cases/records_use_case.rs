//! Appointment history and medical record lists.

use std::sync::Arc;

use tracing::debug;

use super::ResolveSessionUseCase;
use crate::domain::entities::{Appointment, Notification, Prescription, Report, Role};
use crate::domain::errors::ApiError;
use crate::domain::ports::{CarePort, SessionStoragePort};

/// Read-only lists for the signed-in account.
#[derive(Clone)]
pub struct RecordsUseCase {
    care_port: Arc<dyn CarePort>,
    sessions: ResolveSessionUseCase,
}

impl RecordsUseCase {
    #[must_use]
    pub fn new(care_port: Arc<dyn CarePort>, storage_port: Arc<dyn SessionStoragePort>) -> Self {
        Self {
            care_port,
            sessions: ResolveSessionUseCase::new(storage_port),
        }
    }

    /// Appointments of the signed-in patient or doctor.
    ///
    /// # Errors
    /// Returns error if nobody is signed in or the call fails.
    pub async fn appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        let session = self.sessions.require().await?;
        let appointments = self
            .care_port
            .fetch_appointments(session.role, session.user_id)
            .await?;
        debug!(count = appointments.len(), "Appointments loaded");
        Ok(appointments)
    }

    /// # Errors
    /// Returns error if nobody is signed in as a patient or the call fails.
    pub async fn prescriptions(&self) -> Result<Vec<Prescription>, ApiError> {
        let session = self.sessions.require_role(Role::Patient).await?;
        self.care_port.fetch_prescriptions(session.user_id).await
    }

    /// # Errors
    /// Returns error if nobody is signed in as a patient or the call fails.
    pub async fn reports(&self) -> Result<Vec<Report>, ApiError> {
        let session = self.sessions.require_role(Role::Patient).await?;
        self.care_port.fetch_reports(session.user_id).await
    }

    /// # Errors
    /// Returns error if nobody is signed in or the call fails.
    pub async fn notifications(&self) -> Result<Vec<Notification>, ApiError> {
        let session = self.sessions.require().await?;
        self.care_port
            .fetch_notifications(session.role, session.user_id)
            .await
    }
}
