//! Book-appointment flow.

use chrono::NaiveDate;
use serde::Serialize;

use super::{FlowDraft, FlowStep, LinearFlow};
use crate::domain::entities::{ConsultationType, Doctor, PaymentMethod, UserId};
use crate::domain::serde_utils::optional_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentStep {
    ConsultationType,
    Schedule,
    Reason,
    Payment,
    Confirmation,
}

impl FlowStep for AppointmentStep {
    const SEQUENCE: &'static [Self] = &[
        Self::ConsultationType,
        Self::Schedule,
        Self::Reason,
        Self::Payment,
        Self::Confirmation,
    ];

    fn title(self) -> &'static str {
        match self {
            Self::ConsultationType => "Consultation type",
            Self::Schedule => "Date & time",
            Self::Reason => "Reason for visit",
            Self::Payment => "Payment",
            Self::Confirmation => "Confirmation",
        }
    }
}

/// Form state of the book-appointment screens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentDraft {
    pub doctor_id: UserId,
    pub doctor_name: String,
    pub fee: f64,
    pub consultation_type: Option<ConsultationType>,
    pub date: Option<NaiveDate>,
    pub time_slot: Option<String>,
    pub reason: String,
    pub payment_method: Option<PaymentMethod>,
}

impl AppointmentDraft {
    /// Starts a draft for the doctor picked in the directory.
    #[must_use]
    pub fn for_doctor(doctor: &Doctor) -> Self {
        Self {
            doctor_id: doctor.id,
            doctor_name: doctor.display_name(),
            fee: doctor.fee,
            ..Self::default()
        }
    }
}

/// Submission sent to the booking endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppointmentBooking {
    pub doctor_id: UserId,
    pub consultation_type: ConsultationType,
    #[serde(with = "optional_date")]
    pub date: Option<NaiveDate>,
    pub time_slot: String,
    pub reason: String,
    pub fee: f64,
    pub payment_method: PaymentMethod,
}

impl FlowDraft for AppointmentDraft {
    type Step = AppointmentStep;
    type Request = AppointmentBooking;

    fn missing(&self, step: AppointmentStep) -> Option<&'static str> {
        match step {
            AppointmentStep::ConsultationType => self
                .consultation_type
                .is_none()
                .then_some("choose a consultation type"),
            AppointmentStep::Schedule => {
                if self.date.is_none() {
                    Some("choose a date")
                } else if self.time_slot.as_deref().is_none_or(|s| s.trim().is_empty()) {
                    Some("choose a time slot")
                } else {
                    None
                }
            }
            AppointmentStep::Reason => self
                .reason
                .trim()
                .is_empty()
                .then_some("describe the reason for the visit"),
            AppointmentStep::Payment => self
                .payment_method
                .is_none()
                .then_some("choose a payment method"),
            AppointmentStep::Confirmation => None,
        }
    }

    fn build(&self) -> AppointmentBooking {
        AppointmentBooking {
            doctor_id: self.doctor_id,
            consultation_type: self.consultation_type.unwrap_or_default(),
            date: self.date,
            time_slot: self.time_slot.clone().unwrap_or_default(),
            reason: self.reason.trim().to_string(),
            fee: self.fee,
            payment_method: self.payment_method.unwrap_or_default(),
        }
    }
}

pub type AppointmentFlow = LinearFlow<AppointmentDraft>;
