//! Family member management.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::ResolveSessionUseCase;
use crate::application::view_state::ViewState;
use crate::domain::entities::{FamilyMember, FamilyMemberDetails, FamilyMemberId, Role, UserId};
use crate::domain::errors::ApiError;
use crate::domain::ports::{FamilyPort, SessionStoragePort};

/// Keeps a local mirror of the account's family members.
///
/// Every successful mutation is followed by a fresh list fetch that replaces
/// the mirror. A failed call leaves the mirror untouched.
pub struct FamilyMembersUseCase {
    family_port: Arc<dyn FamilyPort>,
    sessions: ResolveSessionUseCase,
    members: ViewState<Vec<FamilyMember>>,
}

impl FamilyMembersUseCase {
    #[must_use]
    pub fn new(family_port: Arc<dyn FamilyPort>, storage_port: Arc<dyn SessionStoragePort>) -> Self {
        Self {
            family_port,
            sessions: ResolveSessionUseCase::new(storage_port),
            members: ViewState::default(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ViewState<Vec<FamilyMember>> {
        &self.members
    }

    #[must_use]
    pub fn find(&self, id: FamilyMemberId) -> Option<&FamilyMember> {
        self.members.data().iter().find(|m| m.id == id)
    }

    async fn owner(&self) -> Result<UserId, ApiError> {
        Ok(self.sessions.require_role(Role::Patient).await?.user_id)
    }

    /// Replaces the mirror with the server's list.
    ///
    /// # Errors
    /// Returns error if the call fails.
    pub async fn refresh(&mut self) -> Result<&[FamilyMember], ApiError> {
        let owner = self.owner().await?;
        self.members.begin()?;
        let result = self.family_port.list_members(owner).await;
        let members = self.members.finish(result)?;
        debug!(count = members.len(), "Family members loaded");
        Ok(members.as_slice())
    }

    /// Adds a member and refreshes the mirror.
    ///
    /// # Errors
    /// Returns error if either call fails.
    pub async fn add(&mut self, details: FamilyMemberDetails) -> Result<FamilyMemberId, ApiError> {
        let owner = self.owner().await?;
        self.members.begin()?;
        let result = self.family_port.add_member(owner, &details).await;
        let id = match result {
            Ok(id) => id,
            Err(e) => return Err(self.rejected("add", e)),
        };
        info!(member_id = %id, "Family member added");
        self.members.settle();
        self.refresh().await?;
        Ok(id)
    }

    /// Saves a member's edited details and refreshes the mirror.
    ///
    /// # Errors
    /// Returns error if either call fails.
    pub async fn update(&mut self, member: FamilyMember) -> Result<(), ApiError> {
        let owner = self.owner().await?;
        self.members.begin()?;
        let result = self.family_port.update_member(owner, &member).await;
        if let Err(e) = result {
            return Err(self.rejected("update", e));
        }
        info!(member_id = %member.id, "Family member updated");
        self.members.settle();
        self.refresh().await?;
        Ok(())
    }

    /// Deletes a member and refreshes the mirror.
    ///
    /// # Errors
    /// Returns error if either call fails.
    pub async fn delete(&mut self, id: FamilyMemberId) -> Result<(), ApiError> {
        let owner = self.owner().await?;
        self.members.begin()?;
        let result = self.family_port.delete_member(owner, id).await;
        if let Err(e) = result {
            return Err(self.rejected("delete", e));
        }
        info!(member_id = %id, "Family member deleted");
        self.members.settle();
        self.refresh().await?;
        Ok(())
    }

    fn rejected(&mut self, action: &str, error: ApiError) -> ApiError {
        warn!(action, error = %error, "Family member change failed");
        self.members.fail(&error);
        error
    }
}
