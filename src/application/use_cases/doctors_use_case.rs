//! Doctor directory screen.

use std::sync::Arc;

use tracing::debug;

use crate::application::view_state::ViewState;
use crate::domain::entities::{Doctor, filter_doctors};
use crate::domain::errors::ApiError;
use crate::domain::ports::CarePort;

/// Fetches the doctor list and filters it locally.
pub struct DoctorsUseCase {
    care_port: Arc<dyn CarePort>,
    doctors: ViewState<Vec<Doctor>>,
}

impl DoctorsUseCase {
    #[must_use]
    pub fn new(care_port: Arc<dyn CarePort>) -> Self {
        Self {
            care_port,
            doctors: ViewState::default(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ViewState<Vec<Doctor>> {
        &self.doctors
    }

    /// Fetches the directory.
    ///
    /// # Errors
    /// Returns error if the call fails; the previous list stays in place.
    pub async fn load(&mut self) -> Result<&[Doctor], ApiError> {
        self.doctors.begin()?;
        let result = self.care_port.fetch_doctors().await;
        let doctors = self.doctors.finish(result)?;
        debug!(count = doctors.len(), "Doctor list loaded");
        Ok(doctors.as_slice())
    }

    /// Filters the loaded list by name or specialization.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Doctor> {
        filter_doctors(self.doctors.data(), query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{DoctorStatus, UserId};
    use crate::domain::ports::mocks::MockCarePort;

    fn doctors() -> Vec<Doctor> {
        vec![
            Doctor {
                id: UserId(1),
                name: "Meera Iyer".to_string(),
                specialization: "Cardiologist".to_string(),
                status: DoctorStatus::Online,
                ..Doctor::default()
            },
            Doctor {
                id: UserId(2),
                name: "Rahul Verma".to_string(),
                specialization: "Dermatologist".to_string(),
                ..Doctor::default()
            },
        ]
    }

    #[tokio::test]
    async fn test_load_then_search() {
        let mut use_case = DoctorsUseCase::new(Arc::new(MockCarePort::with_doctors(doctors())));
        assert_eq!(use_case.load().await.unwrap().len(), 2);

        let hits = use_case.search("derma");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, UserId(2));
    }

    #[tokio::test]
    async fn test_offline_reload_keeps_list() {
        let care = Arc::new(MockCarePort::with_doctors(doctors()));
        let mut use_case = DoctorsUseCase::new(care.clone());
        use_case.load().await.unwrap();

        care.set_offline(true);
        assert!(use_case.load().await.is_err());

        assert_eq!(use_case.state().data().len(), 2);
        assert!(use_case.state().error().is_some());
    }
}
