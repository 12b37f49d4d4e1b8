//! Family member port definition.

use async_trait::async_trait;

use crate::domain::entities::{FamilyMember, FamilyMemberDetails, FamilyMemberId, UserId};
use crate::domain::errors::ApiError;

/// Port for the remote family member list.
#[async_trait]
pub trait FamilyPort: Send + Sync {
    /// Fetches every family member of the account.
    async fn list_members(&self, user_id: UserId) -> Result<Vec<FamilyMember>, ApiError>;

    /// Adds a member and returns the server-assigned id.
    async fn add_member(
        &self,
        user_id: UserId,
        details: &FamilyMemberDetails,
    ) -> Result<FamilyMemberId, ApiError>;

    /// Replaces a member's details.
    async fn update_member(&self, user_id: UserId, member: &FamilyMember) -> Result<(), ApiError>;

    /// Removes a member.
    async fn delete_member(&self, user_id: UserId, id: FamilyMemberId) -> Result<(), ApiError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use tokio::sync::RwLock;

    /// In-memory family list standing in for the backend.
    pub struct MockFamilyPort {
        members: Arc<RwLock<Vec<FamilyMember>>>,
        next_id: AtomicU64,
        offline: AtomicBool,
        list_calls: AtomicU64,
    }

    impl MockFamilyPort {
        pub fn new() -> Self {
            Self {
                members: Arc::new(RwLock::new(Vec::new())),
                next_id: AtomicU64::new(100),
                offline: AtomicBool::new(false),
                list_calls: AtomicU64::new(0),
            }
        }

        /// Makes every call fail at the transport level.
        pub fn set_offline(&self, value: bool) {
            self.offline.store(value, Ordering::SeqCst);
        }

        /// Number of list fetches served.
        pub fn list_calls(&self) -> u64 {
            self.list_calls.load(Ordering::SeqCst)
        }

        fn check(&self) -> Result<(), ApiError> {
            if self.offline.load(Ordering::SeqCst) {
                Err(ApiError::network("connection refused"))
            } else {
                Ok(())
            }
        }

        fn not_found() -> ApiError {
            ApiError::rejected(Some("Family member not found".to_string()))
        }
    }

    impl Default for MockFamilyPort {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl FamilyPort for MockFamilyPort {
        async fn list_members(&self, _user_id: UserId) -> Result<Vec<FamilyMember>, ApiError> {
            self.check()?;
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.members.read().await.clone())
        }

        async fn add_member(
            &self,
            _user_id: UserId,
            details: &FamilyMemberDetails,
        ) -> Result<FamilyMemberId, ApiError> {
            self.check()?;
            let id = FamilyMemberId(self.next_id.fetch_add(1, Ordering::SeqCst));
            self.members
                .write()
                .await
                .push(FamilyMember::new(id, details.clone()));
            Ok(id)
        }

        async fn update_member(
            &self,
            _user_id: UserId,
            member: &FamilyMember,
        ) -> Result<(), ApiError> {
            self.check()?;
            let mut members = self.members.write().await;
            let slot = members
                .iter_mut()
                .find(|m| m.id == member.id)
                .ok_or_else(Self::not_found)?;
            *slot = member.clone();
            Ok(())
        }

        async fn delete_member(&self, _user_id: UserId, id: FamilyMemberId) -> Result<(), ApiError> {
            self.check()?;
            let mut members = self.members.write().await;
            let before = members.len();
            members.retain(|m| m.id != id);
            if members.len() == before {
                return Err(Self::not_found());
            }
            Ok(())
        }
    }
}
