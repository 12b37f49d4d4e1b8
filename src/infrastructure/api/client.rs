//! VaidyaCare backend HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::dto::{
    AccountData, CreatedData, DeleteMemberForm, DoctorQuery, LoginForm, NoFields, OwnedBy,
    RoleQuery, StatusForm, UserQuery,
};
use super::endpoints::{self, Encoding, Endpoint, Method};
use super::envelope::Envelope;
use crate::domain::entities::{
    Appointment, BookingConfirmation, Doctor, DoctorStatus, EmergencyDispatch, EmergencyRequest,
    FamilyMember, FamilyMemberDetails, FamilyMemberId, LoginId, Notification, Password,
    Prescription, Report, Role, Session, UserId, UserProfile,
};
use crate::domain::errors::ApiError;
use crate::domain::flow::{AppointmentBooking, HomeServiceBooking};
use crate::domain::ports::{AuthPort, CarePort, DoctorSignup, FamilyPort, PatientSignup, ServicesPort};
use crate::infrastructure::config::ApiConfig;

const USER_AGENT: &str = concat!("vaidyacare/", env!("CARGO_PKG_VERSION"));

/// Client for the PHP scripts behind `api.base_url`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client from the `[api]` config section.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Creates a client with default timeouts against `base_url`.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::new(&ApiConfig {
            base_url: base_url.into(),
            ..ApiConfig::default()
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends `body` to `endpoint` and unwraps the response envelope.
    ///
    /// # Errors
    /// Returns [`ApiError::Network`] or [`ApiError::Http`] on transport
    /// failure, [`ApiError::Rejected`] when the server reports
    /// `success=false` and [`ApiError::Parse`] on malformed bodies.
    pub async fn call<B, T>(&self, endpoint: Endpoint, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        let url = endpoint.url(&self.base_url);
        debug!(endpoint = endpoint.path, method = %endpoint.method, "Calling backend");

        let builder = match endpoint.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        let request = match endpoint.encoding {
            Encoding::Query => builder.query(body),
            Encoding::Form => builder.form(body),
            Encoding::Json => builder.json(body),
        };

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, endpoint = endpoint.path, "Failed to reach backend");
            transport_error(&e)
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            warn!(error = %e, endpoint = endpoint.path, "Failed to read response body");
            transport_error(&e)
        })?;

        let result = decode(endpoint, status, &text);
        if let Err(e) = &result {
            debug!(endpoint = endpoint.path, status = status.as_u16(), error = %e, "Call failed");
        }
        result
    }
}

fn transport_error(e: &reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::network("request timed out")
    } else if e.is_connect() {
        ApiError::network("failed to connect to the VaidyaCare server")
    } else {
        ApiError::network(e.to_string())
    }
}

fn decode<T>(endpoint: Endpoint, status: StatusCode, text: &str) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    match serde_json::from_str::<Envelope>(text) {
        Ok(envelope) => envelope.into_result(),
        Err(_) if !status.is_success() => {
            warn!(endpoint = endpoint.path, status = status.as_u16(), "Backend returned an error page");
            Err(ApiError::Http {
                status: status.as_u16(),
            })
        }
        Err(e) => {
            warn!(error = %e, endpoint = endpoint.path, "Response is not an envelope");
            Err(ApiError::parse(e.to_string()))
        }
    }
}

/// Builds the session for a fresh account, filling blanks from the form.
fn registered(
    account: AccountData,
    role: Role,
    name: &str,
    email: &str,
    mobile: &str,
) -> Result<Session, ApiError> {
    if account.id.as_u64() == 0 {
        warn!(role = %role, "Signup response carried no account id");
        return Err(ApiError::parse("signup response carried no account id"));
    }
    let name = if account.name.is_empty() {
        name.to_string()
    } else {
        account.name.clone()
    };
    let session = AccountData { name, ..account }.into_session(role, email, mobile);
    info!(user_id = %session.user_id, role = %role, "Account registered");
    Ok(session)
}

#[async_trait]
impl AuthPort for ApiClient {
    async fn login(
        &self,
        role: Role,
        login_id: &LoginId,
        password: &Password,
    ) -> Result<Session, ApiError> {
        let endpoint = match role {
            Role::Patient => endpoints::LOGIN,
            Role::Doctor => endpoints::DOCTOR_LOGIN,
        };

        let form = LoginForm::new(login_id, password.as_str());
        let account: AccountData = self.call(endpoint, &form).await?;
        if account.id.as_u64() == 0 {
            return Err(ApiError::parse("login response carried no account id"));
        }

        let (email, mobile) = match login_id {
            LoginId::Email(email) => (email.as_str(), ""),
            LoginId::Mobile(mobile) => ("", mobile.as_str()),
        };
        let session = account.into_session(role, email, mobile);
        info!(user_id = %session.user_id, role = %role, "Signed in");
        Ok(session)
    }

    async fn signup_patient(&self, form: &PatientSignup) -> Result<Session, ApiError> {
        let account: AccountData = self.call(endpoints::SIGNUP, form).await?;
        registered(account, Role::Patient, &form.name, &form.email, &form.mobile)
    }

    async fn signup_doctor(&self, form: &DoctorSignup) -> Result<Session, ApiError> {
        let account: AccountData = self.call(endpoints::DOCTOR_SIGNUP, form).await?;
        registered(account, Role::Doctor, &form.name, &form.email, &form.mobile)
    }

    async fn health_check(&self) -> Result<(), ApiError> {
        self.call::<_, serde_json::Value>(endpoints::HEALTH, &NoFields {})
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl CarePort for ApiClient {
    async fn fetch_profile(&self, user_id: UserId) -> Result<UserProfile, ApiError> {
        let mut profile: UserProfile = self
            .call(endpoints::GET_PROFILE, &UserQuery { user_id })
            .await?;
        if profile.id.as_u64() == 0 {
            profile.id = user_id;
        }
        Ok(profile)
    }

    async fn update_profile(&self, profile: &UserProfile) -> Result<(), ApiError> {
        let body = OwnedBy {
            user_id: profile.id,
            payload: profile,
        };
        self.call::<_, serde_json::Value>(endpoints::UPDATE_PROFILE, &body)
            .await
            .map(|_| ())
    }

    async fn fetch_doctor_profile(&self, doctor_id: UserId) -> Result<Doctor, ApiError> {
        let mut doctor: Doctor = self
            .call(endpoints::GET_DOCTOR_PROFILE, &DoctorQuery { doctor_id })
            .await?;
        if doctor.id.as_u64() == 0 {
            doctor.id = doctor_id;
        }
        Ok(doctor)
    }

    async fn update_doctor_status(
        &self,
        doctor_id: UserId,
        status: DoctorStatus,
    ) -> Result<(), ApiError> {
        let form = StatusForm {
            doctor_id,
            status: status.as_str(),
        };
        self.call::<_, serde_json::Value>(endpoints::UPDATE_DOCTOR_STATUS, &form)
            .await
            .map(|_| ())
    }

    async fn fetch_doctors(&self) -> Result<Vec<Doctor>, ApiError> {
        self.call(endpoints::GET_DOCTORS, &NoFields {}).await
    }

    async fn book_appointment(
        &self,
        user_id: UserId,
        booking: &AppointmentBooking,
    ) -> Result<BookingConfirmation, ApiError> {
        let body = OwnedBy {
            user_id,
            payload: booking,
        };
        self.call(endpoints::BOOK_APPOINTMENT, &body).await
    }

    async fn fetch_appointments(
        &self,
        role: Role,
        user_id: UserId,
    ) -> Result<Vec<Appointment>, ApiError> {
        self.call(endpoints::GET_APPOINTMENTS, &RoleQuery { user_id, role })
            .await
    }

    async fn fetch_prescriptions(&self, user_id: UserId) -> Result<Vec<Prescription>, ApiError> {
        self.call(endpoints::GET_PRESCRIPTIONS, &UserQuery { user_id })
            .await
    }

    async fn fetch_reports(&self, user_id: UserId) -> Result<Vec<Report>, ApiError> {
        self.call(endpoints::GET_REPORTS, &UserQuery { user_id }).await
    }

    async fn fetch_notifications(
        &self,
        role: Role,
        user_id: UserId,
    ) -> Result<Vec<Notification>, ApiError> {
        self.call(endpoints::GET_NOTIFICATIONS, &RoleQuery { user_id, role })
            .await
    }
}

#[async_trait]
impl FamilyPort for ApiClient {
    async fn list_members(&self, user_id: UserId) -> Result<Vec<FamilyMember>, ApiError> {
        self.call(endpoints::GET_FAMILY_MEMBERS, &UserQuery { user_id })
            .await
    }

    async fn add_member(
        &self,
        user_id: UserId,
        details: &FamilyMemberDetails,
    ) -> Result<FamilyMemberId, ApiError> {
        let body = OwnedBy {
            user_id,
            payload: details,
        };
        let created: CreatedData = self.call(endpoints::ADD_FAMILY_MEMBER, &body).await?;
        Ok(FamilyMemberId(created.id))
    }

    async fn update_member(&self, user_id: UserId, member: &FamilyMember) -> Result<(), ApiError> {
        let body = OwnedBy {
            user_id,
            payload: member,
        };
        self.call::<_, serde_json::Value>(endpoints::UPDATE_FAMILY_MEMBER, &body)
            .await
            .map(|_| ())
    }

    async fn delete_member(&self, user_id: UserId, id: FamilyMemberId) -> Result<(), ApiError> {
        let form = DeleteMemberForm {
            user_id,
            member_id: id,
        };
        self.call::<_, serde_json::Value>(endpoints::DELETE_FAMILY_MEMBER, &form)
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl ServicesPort for ApiClient {
    async fn request_ambulance(
        &self,
        request: &EmergencyRequest,
    ) -> Result<EmergencyDispatch, ApiError> {
        self.call(endpoints::EMERGENCY_REQUEST, request).await
    }

    async fn book_home_service(
        &self,
        user_id: UserId,
        booking: &HomeServiceBooking,
    ) -> Result<BookingConfirmation, ApiError> {
        let body = OwnedBy {
            user_id,
            payload: booking,
        };
        self.call(endpoints::BOOK_HOME_SERVICE, &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ApiClient::with_base_url("http://127.0.0.1/vaidyacare/api");
        assert!(client.is_ok());
    }

    #[test]
    fn test_error_page_is_http_error() {
        let err = decode::<Vec<Doctor>>(
            endpoints::GET_DOCTORS,
            StatusCode::INTERNAL_SERVER_ERROR,
            "<html>Fatal error</html>",
        )
        .unwrap_err();

        assert!(matches!(err, ApiError::Http { status: 500 }));
        assert!(err.is_network_error());
    }

    #[test]
    fn test_error_status_with_envelope_follows_envelope() {
        let err = decode::<Vec<Doctor>>(
            endpoints::LOGIN,
            StatusCode::UNAUTHORIZED,
            r#"{"success":false,"message":"Invalid password"}"#,
        )
        .unwrap_err();

        assert_eq!(err.user_message(), "Invalid password");
    }

    #[test]
    fn test_garbage_body_is_parse_error() {
        let err =
            decode::<Vec<Doctor>>(endpoints::GET_DOCTORS, StatusCode::OK, "Connected!").unwrap_err();
        assert!(matches!(err, ApiError::Parse { .. }));
    }

    #[test]
    fn test_signup_without_account_id_is_refused() {
        let account: AccountData = decode(
            endpoints::SIGNUP,
            StatusCode::OK,
            r#"{"success":true,"message":"Registered"}"#,
        )
        .unwrap();

        let err = registered(account, Role::Patient, "Asha", "a@b.c", "98").unwrap_err();
        assert!(matches!(err, ApiError::Parse { .. }));
    }

    #[test]
    fn test_signup_fills_name_from_form() {
        let account: AccountData = decode(
            endpoints::DOCTOR_SIGNUP,
            StatusCode::OK,
            r#"{"success":true,"data":{"doctor_id":"14"}}"#,
        )
        .unwrap();

        let session = registered(account, Role::Doctor, "Meera Iyer", "m@x.in", "98").unwrap();
        assert_eq!(session.user_id, UserId(14));
        assert_eq!(session.name, "Meera Iyer");
        assert_eq!(session.email, "m@x.in");
    }
}
