//! Home nursing service flow submission.

use std::sync::Arc;

use tracing::{info, warn};

use super::ResolveSessionUseCase;
use crate::domain::entities::{BookingConfirmation, Role};
use crate::domain::errors::ApiError;
use crate::domain::flow::{HomeServiceDraft, HomeServiceFlow};
use crate::domain::ports::{ServicesPort, SessionStoragePort};

#[derive(Clone)]
pub struct HomeServiceUseCase {
    services_port: Arc<dyn ServicesPort>,
    sessions: ResolveSessionUseCase,
}

impl HomeServiceUseCase {
    #[must_use]
    pub fn new(
        services_port: Arc<dyn ServicesPort>,
        storage_port: Arc<dyn SessionStoragePort>,
    ) -> Self {
        Self {
            services_port,
            sessions: ResolveSessionUseCase::new(storage_port),
        }
    }

    /// Opens the flow with the patient's name filled in from the session.
    ///
    /// # Errors
    /// Returns error if nobody is signed in as a patient.
    pub async fn start(&self) -> Result<HomeServiceFlow, ApiError> {
        let session = self.sessions.require_role(Role::Patient).await?;
        let draft = HomeServiceDraft {
            patient_name: session.name,
            ..HomeServiceDraft::default()
        };
        Ok(HomeServiceFlow::new(draft))
    }

    /// Submits the flow and, on success, moves it to its confirmation step.
    ///
    /// # Errors
    /// Returns error if the flow is incomplete, nobody is signed in as a
    /// patient, or the call fails. The flow is left unchanged on error.
    pub async fn submit(&self, flow: &mut HomeServiceFlow) -> Result<BookingConfirmation, ApiError> {
        let booking = flow.build_request()?;
        let session = self.sessions.require_role(Role::Patient).await?;

        let confirmation = self
            .services_port
            .book_home_service(session.user_id, &booking)
            .await
            .map_err(|e| {
                warn!(error = %e, service = %booking.service, "Home service booking failed");
                e
            })?;

        flow.confirm()?;
        info!(
            booking_id = confirmation.booking_id,
            service = %booking.service,
            days = booking.duration_days,
            "Home service booked"
        );
        Ok(confirmation)
    }
}
