//! Display-only medical record value objects.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::serde_utils::{lenient_bool, null_as_empty, optional_date, string_to_u64};

/// Single line of a prescription.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub dosage: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub duration: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    #[serde(default, with = "string_to_u64")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub doctor_name: String,
    #[serde(default, with = "optional_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub diagnosis: String,
    #[serde(default)]
    pub medicines: Vec<Medicine>,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default, with = "string_to_u64")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub category: String,
    #[serde(default, with = "optional_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub file_path: String,
}

/// In-app notification (not a toast).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default, with = "string_to_u64")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub created_at: String,
    #[serde(default, deserialize_with = "lenient_bool::deserialize")]
    pub is_read: bool,
}

/// Counts notifications not yet read.
#[must_use]
pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.is_read).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prescription_without_medicines() {
        let prescription: Prescription =
            serde_json::from_str(r#"{"id":1,"doctor_name":"Dr. Nair","date":""}"#).unwrap();
        assert!(prescription.medicines.is_empty());
        assert_eq!(prescription.date, None);
    }

    #[test]
    fn test_unread_count() {
        let notifications: Vec<Notification> = serde_json::from_str(
            r#"[{"id":1,"is_read":"1"},{"id":2,"is_read":"0"},{"id":3}]"#,
        )
        .unwrap();
        assert_eq!(unread_count(&notifications), 2);
    }
}
