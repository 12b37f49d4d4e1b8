//! Account authentication port definition.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::entities::{LoginId, Password, Role, Session};
use crate::domain::errors::ApiError;
use crate::domain::serde_utils::optional_date;

/// Patient signup form.
#[derive(Debug, Clone, Serialize)]
pub struct PatientSignup {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub password: Password,
    #[serde(with = "optional_date")]
    pub dob: Option<NaiveDate>,
    pub gender: String,
    pub blood_group: String,
    pub address: String,
}

impl PatientSignup {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        mobile: impl Into<String>,
        password: Password,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            mobile: mobile.into(),
            password,
            dob: None,
            gender: String::new(),
            blood_group: String::new(),
            address: String::new(),
        }
    }
}

/// Doctor signup form.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorSignup {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub password: Password,
    pub specialization: String,
    pub experience: u32,
    pub fee: f64,
    pub license_number: String,
}

/// Port for account operations against the backend.
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Verifies credentials and returns the session identifiers.
    async fn login(
        &self,
        role: Role,
        login_id: &LoginId,
        password: &Password,
    ) -> Result<Session, ApiError>;

    /// Registers a patient account.
    async fn signup_patient(&self, form: &PatientSignup) -> Result<Session, ApiError>;

    /// Registers a doctor account.
    async fn signup_doctor(&self, form: &DoctorSignup) -> Result<Session, ApiError>;

    /// Checks backend availability.
    async fn health_check(&self) -> Result<(), ApiError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::entities::UserId;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Mock authentication port for testing.
    pub struct MockAuthPort {
        should_succeed: Arc<AtomicBool>,
        offline: Arc<AtomicBool>,
    }

    impl MockAuthPort {
        /// Creates new mock.
        pub fn new(should_succeed: bool) -> Self {
            Self {
                should_succeed: Arc::new(AtomicBool::new(should_succeed)),
                offline: Arc::new(AtomicBool::new(false)),
            }
        }

        /// Makes every call fail at the transport level.
        pub fn set_offline(&self, value: bool) {
            self.offline.store(value, Ordering::SeqCst);
        }

        fn check(&self) -> Result<(), ApiError> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(ApiError::network("connection refused"));
            }
            if !self.should_succeed.load(Ordering::SeqCst) {
                return Err(ApiError::rejected(Some("Invalid credentials".to_string())));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl AuthPort for MockAuthPort {
        async fn login(
            &self,
            role: Role,
            login_id: &LoginId,
            _password: &Password,
        ) -> Result<Session, ApiError> {
            self.check()?;
            let (email, mobile) = match login_id {
                LoginId::Email(email) => (email.clone(), String::new()),
                LoginId::Mobile(mobile) => (String::new(), mobile.clone()),
            };
            Ok(Session::new(role, UserId(101), "Test User").with_contact(email, mobile))
        }

        async fn signup_patient(&self, form: &PatientSignup) -> Result<Session, ApiError> {
            self.check()?;
            Ok(Session::new(Role::Patient, UserId(202), form.name.clone())
                .with_contact(form.email.clone(), form.mobile.clone()))
        }

        async fn signup_doctor(&self, form: &DoctorSignup) -> Result<Session, ApiError> {
            self.check()?;
            Ok(Session::new(Role::Doctor, UserId(303), form.name.clone())
                .with_contact(form.email.clone(), form.mobile.clone()))
        }

        async fn health_check(&self) -> Result<(), ApiError> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(ApiError::network("connection refused"));
            }
            Ok(())
        }
    }
}
