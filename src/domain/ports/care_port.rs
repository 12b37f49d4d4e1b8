//! Profile, doctor directory, appointment and record port definition.

use async_trait::async_trait;

use crate::domain::entities::{
    Appointment, BookingConfirmation, Doctor, DoctorStatus, Notification, Prescription, Report,
    Role, UserId, UserProfile,
};
use crate::domain::errors::ApiError;
use crate::domain::flow::AppointmentBooking;

/// Port for the care-related backend endpoints.
#[async_trait]
pub trait CarePort: Send + Sync {
    /// Fetches the patient profile.
    async fn fetch_profile(&self, user_id: UserId) -> Result<UserProfile, ApiError>;

    /// Saves the patient profile.
    async fn update_profile(&self, profile: &UserProfile) -> Result<(), ApiError>;

    /// Fetches a doctor's own profile.
    async fn fetch_doctor_profile(&self, doctor_id: UserId) -> Result<Doctor, ApiError>;

    /// Sets a doctor's consultation status.
    async fn update_doctor_status(
        &self,
        doctor_id: UserId,
        status: DoctorStatus,
    ) -> Result<(), ApiError>;

    /// Fetches the doctor directory.
    async fn fetch_doctors(&self) -> Result<Vec<Doctor>, ApiError>;

    /// Books an appointment for a patient.
    async fn book_appointment(
        &self,
        user_id: UserId,
        booking: &AppointmentBooking,
    ) -> Result<BookingConfirmation, ApiError>;

    /// Fetches appointments of a patient or doctor.
    async fn fetch_appointments(
        &self,
        role: Role,
        user_id: UserId,
    ) -> Result<Vec<Appointment>, ApiError>;

    /// Fetches a patient's prescriptions.
    async fn fetch_prescriptions(&self, user_id: UserId) -> Result<Vec<Prescription>, ApiError>;

    /// Fetches a patient's lab and imaging reports.
    async fn fetch_reports(&self, user_id: UserId) -> Result<Vec<Report>, ApiError>;

    /// Fetches in-app notifications.
    async fn fetch_notifications(
        &self,
        role: Role,
        user_id: UserId,
    ) -> Result<Vec<Notification>, ApiError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::RwLock;

    /// In-memory care backend for testing.
    pub struct MockCarePort {
        offline: Arc<AtomicBool>,
        pub profile: Arc<RwLock<UserProfile>>,
        pub doctors: Arc<RwLock<Vec<Doctor>>>,
        pub bookings: Arc<RwLock<Vec<(UserId, AppointmentBooking)>>>,
        pub appointments: Vec<Appointment>,
    }

    impl MockCarePort {
        pub fn new() -> Self {
            Self {
                offline: Arc::new(AtomicBool::new(false)),
                profile: Arc::new(RwLock::new(UserProfile::default())),
                doctors: Arc::new(RwLock::new(Vec::new())),
                bookings: Arc::new(RwLock::new(Vec::new())),
                appointments: Vec::new(),
            }
        }

        pub fn with_doctors(doctors: Vec<Doctor>) -> Self {
            let mock = Self::new();
            *mock.doctors.try_write().expect("fresh lock") = doctors;
            mock
        }

        pub fn with_profile(profile: UserProfile) -> Self {
            let mock = Self::new();
            *mock.profile.try_write().expect("fresh lock") = profile;
            mock
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

    impl Default for MockCarePort {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl CarePort for MockCarePort {
        async fn fetch_profile(&self, _user_id: UserId) -> Result<UserProfile, ApiError> {
            self.check()?;
            Ok(self.profile.read().await.clone())
        }

        async fn update_profile(&self, profile: &UserProfile) -> Result<(), ApiError> {
            self.check()?;
            *self.profile.write().await = profile.clone();
            Ok(())
        }

        async fn fetch_doctor_profile(&self, doctor_id: UserId) -> Result<Doctor, ApiError> {
            self.check()?;
            self.doctors
                .read()
                .await
                .iter()
                .find(|d| d.id == doctor_id)
                .cloned()
                .ok_or_else(|| ApiError::rejected(Some("Doctor not found".to_string())))
        }

        async fn update_doctor_status(
            &self,
            doctor_id: UserId,
            status: DoctorStatus,
        ) -> Result<(), ApiError> {
            self.check()?;
            let mut doctors = self.doctors.write().await;
            let doctor = doctors
                .iter_mut()
                .find(|d| d.id == doctor_id)
                .ok_or_else(|| ApiError::rejected(Some("Doctor not found".to_string())))?;
            doctor.status = status;
            Ok(())
        }

        async fn fetch_doctors(&self) -> Result<Vec<Doctor>, ApiError> {
            self.check()?;
            Ok(self.doctors.read().await.clone())
        }

        async fn book_appointment(
            &self,
            user_id: UserId,
            booking: &AppointmentBooking,
        ) -> Result<BookingConfirmation, ApiError> {
            self.check()?;
            let mut bookings = self.bookings.write().await;
            bookings.push((user_id, booking.clone()));
            Ok(BookingConfirmation {
                booking_id: bookings.len() as u64,
                reference: format!("APT-{}", bookings.len()),
            })
        }

        async fn fetch_appointments(
            &self,
            _role: Role,
            _user_id: UserId,
        ) -> Result<Vec<Appointment>, ApiError> {
            self.check()?;
            Ok(self.appointments.clone())
        }

        async fn fetch_prescriptions(
            &self,
            _user_id: UserId,
        ) -> Result<Vec<Prescription>, ApiError> {
            self.check()?;
            Ok(Vec::new())
        }

        async fn fetch_reports(&self, _user_id: UserId) -> Result<Vec<Report>, ApiError> {
            self.check()?;
            Ok(Vec::new())
        }

        async fn fetch_notifications(
            &self,
            _role: Role,
            _user_id: UserId,
        ) -> Result<Vec<Notification>, ApiError> {
            self.check()?;
            Ok(Vec::new())
        }
    }
}
