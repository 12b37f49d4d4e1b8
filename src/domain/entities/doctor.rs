//! Doctor entity and directory helpers.

use serde::{Deserialize, Serialize};

use super::UserId;
use crate::domain::serde_utils::{lenient_f64, lenient_u32, null_as_empty};

/// Consultation availability shown as a badge next to each doctor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DoctorStatus {
    Online,
    Busy,
    #[default]
    Offline,
}

impl DoctorStatus {
    /// Parses the backend value case-insensitively. Unknown values read as offline.
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "online" | "available" => Self::Online,
            "busy" | "in consultation" => Self::Busy,
            _ => Self::Offline,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Busy => "Busy",
            Self::Offline => "Offline",
        }
    }

    /// Badge colour as a hex RGB string.
    #[must_use]
    pub const fn badge_color(self) -> &'static str {
        match self {
            Self::Online => "#2E7D32",
            Self::Busy => "#F9A825",
            Self::Offline => "#757575",
        }
    }

    /// Whether patients can start a consultation right now.
    #[must_use]
    pub const fn accepts_consultations(self) -> bool {
        matches!(self, Self::Online)
    }
}

impl From<String> for DoctorStatus {
    fn from(value: String) -> Self {
        Self::from_wire(&value)
    }
}

impl From<DoctorStatus> for String {
    fn from(value: DoctorStatus) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for DoctorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Doctor record as listed in the directory and on the doctor's own profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(default)]
    pub id: UserId,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub mobile: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub specialization: String,
    #[serde(default, deserialize_with = "lenient_u32::deserialize")]
    pub experience: u32,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub fee: f64,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub rating: f64,
    #[serde(default)]
    pub status: DoctorStatus,
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl Doctor {
    /// Name with the customary title.
    #[must_use]
    pub fn display_name(&self) -> String {
        let name = self.name.trim();
        if name.to_ascii_lowercase().starts_with("dr") {
            name.to_string()
        } else {
            format!("Dr. {name}")
        }
    }

    /// Case-insensitive substring match on name or specialization.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.name.to_lowercase().contains(&query)
            || self.specialization.to_lowercase().contains(&query)
    }
}

/// Filters `doctors` by `query`, preserving order. An empty query keeps everything.
#[must_use]
pub fn filter_doctors<'a>(doctors: &'a [Doctor], query: &str) -> Vec<&'a Doctor> {
    doctors.iter().filter(|d| d.matches(query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn doctor(name: &str, specialization: &str) -> Doctor {
        Doctor {
            name: name.to_string(),
            specialization: specialization.to_string(),
            ..Doctor::default()
        }
    }

    #[test_case("online", DoctorStatus::Online)]
    #[test_case("ONLINE", DoctorStatus::Online)]
    #[test_case(" Busy ", DoctorStatus::Busy)]
    #[test_case("offline", DoctorStatus::Offline)]
    #[test_case("", DoctorStatus::Offline)]
    #[test_case("on leave", DoctorStatus::Offline)]
    fn test_status_from_wire(value: &str, expected: DoctorStatus) {
        assert_eq!(DoctorStatus::from_wire(value), expected);
    }

    #[test]
    fn test_badge_colors_are_distinct() {
        let colors = [
            DoctorStatus::Online.badge_color(),
            DoctorStatus::Busy.badge_color(),
            DoctorStatus::Offline.badge_color(),
        ];
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }

    #[test]
    fn test_filter_matches_name_and_specialization() {
        let doctors = vec![
            doctor("Meera Iyer", "Cardiologist"),
            doctor("Rahul Verma", "Dermatologist"),
            doctor("Kavya Nair", "Cardiac Surgeon"),
        ];

        let by_specialization: Vec<_> = filter_doctors(&doctors, "CARDI")
            .into_iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(by_specialization, vec!["Meera Iyer", "Kavya Nair"]);

        let by_name = filter_doctors(&doctors, "verma");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].specialization, "Dermatologist");
    }

    #[test]
    fn test_empty_query_keeps_all() {
        let doctors = vec![doctor("A", "x"), doctor("B", "y")];
        assert_eq!(filter_doctors(&doctors, "  ").len(), 2);
    }

    #[test]
    fn test_doctor_from_loose_json() {
        let doctor: Doctor = serde_json::from_str(
            r#"{"id":"3","name":"Meera Iyer","specialization":"Cardiologist","experience":"12","fee":"500","rating":4.5,"status":"busy"}"#,
        )
        .unwrap();

        assert_eq!(doctor.id, UserId(3));
        assert_eq!(doctor.experience, 12);
        assert!((doctor.fee - 500.0).abs() < f64::EPSILON);
        assert_eq!(doctor.status, DoctorStatus::Busy);
        assert_eq!(doctor.profile_image, None);
        assert_eq!(doctor.display_name(), "Dr. Meera Iyer");
    }
}
