//! Emergency and home-service port definition.

use async_trait::async_trait;

use crate::domain::entities::{BookingConfirmation, EmergencyDispatch, EmergencyRequest, UserId};
use crate::domain::errors::ApiError;
use crate::domain::flow::HomeServiceBooking;

/// Port for on-demand services.
#[async_trait]
pub trait ServicesPort: Send + Sync {
    /// Requests an ambulance.
    async fn request_ambulance(
        &self,
        request: &EmergencyRequest,
    ) -> Result<EmergencyDispatch, ApiError>;

    /// Books a home nursing service.
    async fn book_home_service(
        &self,
        user_id: UserId,
        booking: &HomeServiceBooking,
    ) -> Result<BookingConfirmation, ApiError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::RwLock;

    /// Records submissions and acknowledges them.
    pub struct MockServicesPort {
        offline: AtomicBool,
        pub emergencies: RwLock<Vec<EmergencyRequest>>,
        pub home_services: RwLock<Vec<HomeServiceBooking>>,
    }

    impl MockServicesPort {
        pub fn new() -> Self {
            Self {
                offline: AtomicBool::new(false),
                emergencies: RwLock::new(Vec::new()),
                home_services: RwLock::new(Vec::new()),
            }
        }

        /// Makes every call fail at the transport level.
        pub fn set_offline(&self, value: bool) {
            self.offline.store(value, Ordering::SeqCst);
        }

        fn check(&self) -> Result<(), ApiError> {
            if self.offline.load(Ordering::SeqCst) {
                Err(ApiError::network("connection refused"))
            } else {
                Ok(())
            }
        }
    }

    impl Default for MockServicesPort {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl ServicesPort for MockServicesPort {
        async fn request_ambulance(
            &self,
            request: &EmergencyRequest,
        ) -> Result<EmergencyDispatch, ApiError> {
            self.check()?;
            let mut emergencies = self.emergencies.write().await;
            emergencies.push(request.clone());
            Ok(EmergencyDispatch {
                request_id: emergencies.len() as u64,
                status: "dispatched".to_string(),
                eta_minutes: 15,
            })
        }

        async fn book_home_service(
            &self,
            _user_id: UserId,
            booking: &HomeServiceBooking,
        ) -> Result<BookingConfirmation, ApiError> {
            self.check()?;
            let mut home_services = self.home_services.write().await;
            home_services.push(booking.clone());
            Ok(BookingConfirmation {
                booking_id: home_services.len() as u64,
                reference: format!("HS-{}", home_services.len()),
            })
        }
    }
}
