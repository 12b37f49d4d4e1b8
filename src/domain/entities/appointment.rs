//! Appointment value objects.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::UserId;
use crate::domain::serde_utils::{lenient_f64, null_as_empty, optional_date, string_to_u64};

/// How the patient meets the doctor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConsultationType {
    #[default]
    Video,
    Audio,
    Chat,
    Clinic,
}

impl ConsultationType {
    pub const ALL: [Self; 4] = [Self::Video, Self::Audio, Self::Chat, Self::Clinic];

    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "audio" | "voice" | "audio call" => Self::Audio,
            "chat" | "message" => Self::Chat,
            "clinic" | "in-person" | "in person" | "visit" => Self::Clinic,
            _ => Self::Video,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Chat => "Chat",
            Self::Clinic => "Clinic",
        }
    }
}

impl From<String> for ConsultationType {
    fn from(value: String) -> Self {
        Self::from_wire(&value)
    }
}

impl From<ConsultationType> for String {
    fn from(value: ConsultationType) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for ConsultationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a booking is paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    #[default]
    Upi,
    Card,
    NetBanking,
    Cash,
}

impl PaymentMethod {
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "card" | "creditcard" | "debitcard" => Self::Card,
            "netbanking" => Self::NetBanking,
            "cash" | "cod" | "payatclinic" => Self::Cash,
            _ => Self::Upi,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upi => "UPI",
            Self::Card => "Card",
            Self::NetBanking => "Net Banking",
            Self::Cash => "Cash",
        }
    }
}

impl From<String> for PaymentMethod {
    fn from(value: String) -> Self {
        Self::from_wire(&value)
    }
}

impl From<PaymentMethod> for String {
    fn from(value: PaymentMethod) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AppointmentStatus {
    #[default]
    Upcoming,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "completed" | "done" => Self::Completed,
            "cancelled" | "canceled" | "rejected" => Self::Cancelled,
            _ => Self::Upcoming,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "Upcoming",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Badge colour as a hex RGB string.
    #[must_use]
    pub const fn badge_color(self) -> &'static str {
        match self {
            Self::Upcoming => "#1565C0",
            Self::Completed => "#2E7D32",
            Self::Cancelled => "#C62828",
        }
    }
}

impl From<String> for AppointmentStatus {
    fn from(value: String) -> Self {
        Self::from_wire(&value)
    }
}

impl From<AppointmentStatus> for String {
    fn from(value: AppointmentStatus) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Appointment row shown in the patient's and doctor's lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(default, with = "string_to_u64")]
    pub id: u64,
    #[serde(default)]
    pub doctor_id: UserId,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub doctor_name: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub patient_name: String,
    #[serde(default)]
    pub consultation_type: ConsultationType,
    #[serde(default, with = "optional_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub time_slot: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub reason: String,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub fee: f64,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub status: AppointmentStatus,
}

/// Server acknowledgement of a booking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    #[serde(default, with = "string_to_u64")]
    pub booking_id: u64,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub reference: String,
}

impl BookingConfirmation {
    /// Reference to show the user; falls back to the numeric id.
    #[must_use]
    pub fn display_reference(&self) -> String {
        if self.reference.trim().is_empty() {
            format!("#{}", self.booking_id)
        } else {
            self.reference.clone()
        }
    }
}
