//! Family member entity.

use serde::{Deserialize, Serialize};

use crate::domain::serde_utils::{lenient_u32, null_as_empty, string_to_u64};

/// Server-assigned family member id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FamilyMemberId(#[serde(with = "string_to_u64")] pub u64);

impl std::fmt::Display for FamilyMemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for FamilyMemberId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Editable fields of a family member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMemberDetails {
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub relation: String,
    #[serde(default, deserialize_with = "lenient_u32::deserialize")]
    pub age: u32,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub gender: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub blood_group: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub medical_history: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub allergies: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub medications: String,
}

impl FamilyMemberDetails {
    #[must_use]
    pub fn new(name: impl Into<String>, relation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            relation: relation.into(),
            ..Self::default()
        }
    }
}

/// Family member stored on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMember {
    #[serde(default)]
    pub id: FamilyMemberId,
    #[serde(flatten)]
    pub details: FamilyMemberDetails,
}

impl FamilyMember {
    #[must_use]
    pub const fn new(id: FamilyMemberId, details: FamilyMemberDetails) -> Self {
        Self { id, details }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.details.name
    }

    /// Whether any of the free-text health fields carry content.
    #[must_use]
    pub fn has_health_notes(&self) -> bool {
        [
            &self.details.medical_history,
            &self.details.allergies,
            &self.details.medications,
        ]
        .iter()
        .any(|text| !text.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_from_flat_row() {
        let member: FamilyMember = serde_json::from_str(
            r#"{"id":"17","name":"Lata","relation":"Mother","age":"62","allergies":"Penicillin","medications":null}"#,
        )
        .unwrap();

        assert_eq!(member.id, FamilyMemberId(17));
        assert_eq!(member.name(), "Lata");
        assert_eq!(member.details.age, 62);
        assert_eq!(member.details.medications, "");
        assert!(member.has_health_notes());
    }

    #[test]
    fn test_member_serializes_flat() {
        let member = FamilyMember::new(
            FamilyMemberId(4),
            FamilyMemberDetails::new("Ravi", "Son"),
        );
        let json = serde_json::to_value(&member).unwrap();

        assert_eq!(json["id"], 4);
        assert_eq!(json["name"], "Ravi");
        assert_eq!(json["relation"], "Son");
    }

    #[test]
    fn test_no_health_notes() {
        let member = FamilyMember::new(
            FamilyMemberId(1),
            FamilyMemberDetails::new("Ravi", "Son"),
        );
        assert!(!member.has_health_notes());
    }
}
