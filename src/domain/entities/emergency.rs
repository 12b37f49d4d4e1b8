//! Emergency ambulance request.

use serde::{Deserialize, Serialize};

use super::UserId;
use crate::domain::serde_utils::{lenient_u32, null_as_empty, string_to_u64};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmergencyKind {
    #[default]
    Medical,
    Accident,
    Cardiac,
    Maternity,
    Other,
}

impl EmergencyKind {
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "medical" => Self::Medical,
            "accident" | "trauma" => Self::Accident,
            "cardiac" | "heart" => Self::Cardiac,
            "maternity" | "pregnancy" => Self::Maternity,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Medical => "Medical",
            Self::Accident => "Accident",
            Self::Cardiac => "Cardiac",
            Self::Maternity => "Maternity",
            Self::Other => "Other",
        }
    }
}

impl From<String> for EmergencyKind {
    fn from(value: String) -> Self {
        Self::from_wire(&value)
    }
}

impl From<EmergencyKind> for String {
    fn from(value: EmergencyKind) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for EmergencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ambulance request sent by a signed-in patient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmergencyRequest {
    pub user_id: UserId,
    pub contact_name: String,
    pub contact_mobile: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub emergency_type: EmergencyKind,
    pub notes: String,
}

/// Dispatch acknowledgement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EmergencyDispatch {
    #[serde(default, with = "string_to_u64")]
    pub request_id: u64,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_u32::deserialize")]
    pub eta_minutes: u32,
}

impl EmergencyDispatch {
    /// Arrival estimate for display, if the server gave one.
    #[must_use]
    pub fn eta_text(&self) -> Option<String> {
        (self.eta_minutes > 0).then(|| format!("about {} min", self.eta_minutes))
    }
}
