//! Book-appointment flow submission.

use std::sync::Arc;

use tracing::{info, warn};

use super::ResolveSessionUseCase;
use crate::domain::entities::{BookingConfirmation, Doctor, Role};
use crate::domain::errors::ApiError;
use crate::domain::flow::{AppointmentDraft, AppointmentFlow};
use crate::domain::ports::{CarePort, SessionStoragePort};

/// Starts and submits appointment bookings.
#[derive(Clone)]
pub struct BookAppointmentUseCase {
    care_port: Arc<dyn CarePort>,
    sessions: ResolveSessionUseCase,
}

impl BookAppointmentUseCase {
    #[must_use]
    pub fn new(care_port: Arc<dyn CarePort>, storage_port: Arc<dyn SessionStoragePort>) -> Self {
        Self {
            care_port,
            sessions: ResolveSessionUseCase::new(storage_port),
        }
    }

    /// Opens the flow for the doctor picked in the directory.
    #[must_use]
    pub fn start(&self, doctor: &Doctor) -> AppointmentFlow {
        AppointmentFlow::new(AppointmentDraft::for_doctor(doctor))
    }

    /// Submits the flow and, on success, moves it to its confirmation step.
    ///
    /// # Errors
    /// Returns error if the flow is incomplete, nobody is signed in as a
    /// patient, or the call fails. The flow is left unchanged on error.
    pub async fn submit(&self, flow: &mut AppointmentFlow) -> Result<BookingConfirmation, ApiError> {
        let booking = flow.build_request()?;
        let session = self.sessions.require_role(Role::Patient).await?;

        let confirmation = self
            .care_port
            .book_appointment(session.user_id, &booking)
            .await
            .map_err(|e| {
                warn!(error = %e, doctor_id = %booking.doctor_id, "Appointment booking failed");
                e
            })?;

        flow.confirm()?;
        info!(
            booking_id = confirmation.booking_id,
            doctor_id = %booking.doctor_id,
            "Appointment booked"
        );
        Ok(confirmation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::entities::{ConsultationType, PaymentMethod, Session, UserId};
    use crate::domain::errors::FlowError;
    use crate::domain::flow::AppointmentStep;
    use crate::domain::ports::mocks::{MockCarePort, MockSessionStorage};

    fn doctor() -> Doctor {
        Doctor {
            id: UserId(7),
            name: "Meera Iyer".to_string(),
            fee: 400.0,
            ..Doctor::default()
        }
    }

    fn patient_storage() -> Arc<MockSessionStorage> {
        Arc::new(MockSessionStorage::with_session(Session::new(
            Role::Patient,
            UserId(9),
            "Asha",
        )))
    }

    fn fill(flow: &mut AppointmentFlow) {
        flow.draft_mut().consultation_type = Some(ConsultationType::Video);
        flow.next().unwrap();
        flow.draft_mut().date = NaiveDate::from_ymd_opt(2026, 11, 2);
        flow.draft_mut().time_slot = Some("11:00 AM".to_string());
        flow.next().unwrap();
        flow.draft_mut().reason = "Fever".to_string();
        flow.next().unwrap();
        flow.draft_mut().payment_method = Some(PaymentMethod::Upi);
    }

    #[tokio::test]
    async fn test_submit_confirms_flow() {
        let care = Arc::new(MockCarePort::new());
        let use_case = BookAppointmentUseCase::new(care.clone(), patient_storage());
        let mut flow = use_case.start(&doctor());
        fill(&mut flow);

        let confirmation = use_case.submit(&mut flow).await.unwrap();

        assert_eq!(confirmation.reference, "APT-1");
        assert_eq!(flow.current(), AppointmentStep::Confirmation);
        let bookings = care.bookings.read().await;
        assert_eq!(bookings[0].0, UserId(9));
        assert_eq!(bookings[0].1.doctor_id, UserId(7));
    }

    #[tokio::test]
    async fn test_incomplete_flow_is_not_sent() {
        let care = Arc::new(MockCarePort::new());
        let use_case = BookAppointmentUseCase::new(care.clone(), patient_storage());
        let mut flow = use_case.start(&doctor());

        let err = use_case.submit(&mut flow).await.unwrap_err();

        assert!(matches!(err, ApiError::Flow(FlowError::NotReady { .. })));
        assert!(care.bookings.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_submit_leaves_flow_on_payment() {
        let care = Arc::new(MockCarePort::new());
        care.set_offline(true);
        let use_case = BookAppointmentUseCase::new(care, patient_storage());
        let mut flow = use_case.start(&doctor());
        fill(&mut flow);

        assert!(use_case.submit(&mut flow).await.is_err());
        assert_eq!(flow.current(), AppointmentStep::Payment);
        assert_eq!(flow.draft().reason, "Fever");
    }
}
