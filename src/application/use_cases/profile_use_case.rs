//! Profile screens for patients and doctors.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::ResolveSessionUseCase;
use super::login_use_case::persist;
use crate::application::view_state::ViewState;
use crate::domain::entities::{Doctor, DoctorStatus, ProfileChanges, Role, UserProfile};
use crate::domain::errors::ApiError;
use crate::domain::ports::{CarePort, SessionStoragePort};

/// Loads and edits the signed-in account's profile.
pub struct ProfileUseCase {
    care_port: Arc<dyn CarePort>,
    storage_port: Arc<dyn SessionStoragePort>,
    sessions: ResolveSessionUseCase,
    profile: ViewState<UserProfile>,
    doctor: ViewState<Doctor>,
}

impl ProfileUseCase {
    #[must_use]
    pub fn new(care_port: Arc<dyn CarePort>, storage_port: Arc<dyn SessionStoragePort>) -> Self {
        Self {
            care_port,
            sessions: ResolveSessionUseCase::new(storage_port.clone()),
            storage_port,
            profile: ViewState::default(),
            doctor: ViewState::default(),
        }
    }

    #[must_use]
    pub const fn profile(&self) -> &ViewState<UserProfile> {
        &self.profile
    }

    #[must_use]
    pub const fn doctor(&self) -> &ViewState<Doctor> {
        &self.doctor
    }

    /// Fetches the patient profile.
    ///
    /// # Errors
    /// Returns error if nobody is signed in as a patient or the call fails.
    pub async fn load(&mut self) -> Result<&UserProfile, ApiError> {
        let session = self.sessions.require_role(Role::Patient).await?;
        self.profile.begin()?;
        debug!(user_id = %session.user_id, "Fetching profile");
        let result = self.care_port.fetch_profile(session.user_id).await;
        self.profile.finish(result)
    }

    /// Applies `changes` to the freshly fetched profile and saves it. The
    /// session's cached name and mobile follow the saved values.
    ///
    /// # Errors
    /// Returns error if there is nothing to change or a call fails; the shown
    /// profile is left as it was.
    pub async fn update(&mut self, changes: &ProfileChanges) -> Result<&UserProfile, ApiError> {
        if changes.is_empty() {
            return Err(ApiError::unexpected("no profile fields to update"));
        }
        let mut session = self.sessions.require_role(Role::Patient).await?;

        let mut updated = self.load().await?.clone();
        updated.apply(changes);

        self.profile.begin()?;
        let result = self.care_port.update_profile(&updated).await;
        if let Err(e) = result {
            warn!(error = %e, "Profile update failed");
            self.profile.fail(&e);
            return Err(e);
        }
        info!(user_id = %session.user_id, "Profile updated");

        session.name.clone_from(&updated.name);
        session.mobile.clone_from(&updated.mobile);
        persist(self.storage_port.as_ref(), &session).await;

        self.profile.finish(Ok(updated))
    }

    /// Fetches the signed-in doctor's own profile.
    ///
    /// # Errors
    /// Returns error if nobody is signed in as a doctor or the call fails.
    pub async fn load_doctor(&mut self) -> Result<&Doctor, ApiError> {
        let session = self.sessions.require_role(Role::Doctor).await?;
        self.doctor.begin()?;
        let result = self.care_port.fetch_doctor_profile(session.user_id).await;
        self.doctor.finish(result)
    }

    /// Changes the signed-in doctor's consultation status.
    ///
    /// # Errors
    /// Returns error if nobody is signed in as a doctor or the call fails.
    pub async fn set_status(&mut self, status: DoctorStatus) -> Result<(), ApiError> {
        let session = self.sessions.require_role(Role::Doctor).await?;
        self.doctor.begin()?;
        let result = self
            .care_port
            .update_doctor_status(session.user_id, status)
            .await;
        match result {
            Ok(()) => {
                info!(doctor_id = %session.user_id, %status, "Doctor status changed");
                self.doctor.data_mut().status = status;
                self.doctor.settle();
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Status change failed");
                self.doctor.fail(&e);
                Err(e)
            }
        }
    }
}
