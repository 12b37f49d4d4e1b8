//! Emergency ambulance request.

use std::sync::Arc;

use tracing::{error, info};

use super::ResolveSessionUseCase;
use crate::application::dto::EmergencyInput;
use crate::domain::entities::{EmergencyDispatch, EmergencyRequest, Role};
use crate::domain::errors::ApiError;
use crate::domain::ports::{ServicesPort, SessionStoragePort};

#[derive(Clone)]
pub struct EmergencyUseCase {
    services_port: Arc<dyn ServicesPort>,
    sessions: ResolveSessionUseCase,
}

impl EmergencyUseCase {
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

    /// Sends an ambulance request on behalf of the signed-in patient.
    ///
    /// # Errors
    /// Returns error if the location is blank, nobody is signed in as a
    /// patient, or the call fails.
    pub async fn execute(&self, input: EmergencyInput) -> Result<EmergencyDispatch, ApiError> {
        if input.location.trim().is_empty() {
            return Err(ApiError::unexpected("a pickup location is required"));
        }
        let session = self.sessions.require_role(Role::Patient).await?;

        let request = EmergencyRequest {
            user_id: session.user_id,
            contact_name: input.contact_name.unwrap_or_else(|| session.name.clone()),
            contact_mobile: input
                .contact_mobile
                .unwrap_or_else(|| session.mobile.clone()),
            location: input.location.trim().to_string(),
            latitude: input.latitude,
            longitude: input.longitude,
            emergency_type: input.kind,
            notes: input.notes,
        };

        let dispatch = self
            .services_port
            .request_ambulance(&request)
            .await
            .map_err(|e| {
                error!(error = %e, kind = %request.emergency_type, "Ambulance request failed");
                e
            })?;

        info!(
            request_id = dispatch.request_id,
            status = %dispatch.status,
            "Ambulance requested"
        );
        Ok(dispatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{EmergencyKind, Session, UserId};
    use crate::domain::ports::mocks::{MockServicesPort, MockSessionStorage};

    fn storage() -> Arc<MockSessionStorage> {
        Arc::new(MockSessionStorage::with_session(
            Session::new(Role::Patient, UserId(9), "Asha").with_contact("", "9800000000"),
        ))
    }

    #[tokio::test]
    async fn test_contact_defaults_to_session() {
        let services = Arc::new(MockServicesPort::new());
        let use_case = EmergencyUseCase::new(services.clone(), storage());

        let dispatch = use_case
            .execute(EmergencyInput::new(EmergencyKind::Accident, "NH48 near Lonavala"))
            .await
            .unwrap();

        assert_eq!(dispatch.eta_minutes, 15);
        let sent = &services.emergencies.read().await[0];
        assert_eq!(sent.contact_name, "Asha");
        assert_eq!(sent.contact_mobile, "9800000000");
        assert_eq!(sent.user_id, UserId(9));
    }

    #[tokio::test]
    async fn test_blank_location_is_not_sent() {
        let services = Arc::new(MockServicesPort::new());
        let use_case = EmergencyUseCase::new(services.clone(), storage());

        let result = use_case
            .execute(EmergencyInput::new(EmergencyKind::Medical, "  "))
            .await;

        assert!(result.is_err());
        assert!(services.emergencies.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_network_failure_surfaces() {
        let services = Arc::new(MockServicesPort::new());
        services.set_offline(true);
        let use_case = EmergencyUseCase::new(services, storage());

        let err = use_case
            .execute(EmergencyInput::new(EmergencyKind::Cardiac, "MG Road"))
            .await
            .unwrap_err();
        assert!(err.is_network_error());
    }
}
