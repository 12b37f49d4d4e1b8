//! Patient account entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::serde_utils::{null_as_empty, optional_date, string_to_u64};

/// Server-assigned account id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(#[serde(with = "string_to_u64")] pub u64);

impl UserId {
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Patient profile as returned by the profile endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: UserId,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub mobile: String,
    #[serde(default, with = "optional_date")]
    pub dob: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub gender: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub blood_group: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub address: String,
}

impl UserProfile {
    /// Returns the patient's age in whole years on `today`.
    #[must_use]
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        self.dob.and_then(|dob| today.years_since(dob))
    }

    /// Applies the fields set in `changes`.
    pub fn apply(&mut self, changes: &ProfileChanges) {
        if let Some(name) = &changes.name {
            self.name.clone_from(name);
        }
        if let Some(mobile) = &changes.mobile {
            self.mobile.clone_from(mobile);
        }
        if let Some(dob) = changes.dob {
            self.dob = Some(dob);
        }
        if let Some(gender) = &changes.gender {
            self.gender.clone_from(gender);
        }
        if let Some(blood_group) = &changes.blood_group {
            self.blood_group.clone_from(blood_group);
        }
        if let Some(address) = &changes.address {
            self.address.clone_from(address);
        }
    }
}

/// Partial profile edit. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub address: Option<String>,
}

impl ProfileChanges {
    /// Returns whether no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.mobile.is_none()
            && self.dob.is_none()
            && self.gender.is_none()
            && self.blood_group.is_none()
            && self.address.is_none()
    }
}
