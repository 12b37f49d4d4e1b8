//! Home service booking flow.

use chrono::NaiveDate;
use serde::Serialize;

use super::{FlowDraft, FlowStep, LinearFlow};
use crate::domain::entities::{HomeServiceKind, PaymentMethod};
use crate::domain::serde_utils::optional_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeServiceStep {
    Service,
    Schedule,
    Address,
    Payment,
    Confirmation,
}

impl FlowStep for HomeServiceStep {
    const SEQUENCE: &'static [Self] = &[
        Self::Service,
        Self::Schedule,
        Self::Address,
        Self::Payment,
        Self::Confirmation,
    ];

    fn title(self) -> &'static str {
        match self {
            Self::Service => "Service",
            Self::Schedule => "Date & time",
            Self::Address => "Address",
            Self::Payment => "Payment",
            Self::Confirmation => "Confirmation",
        }
    }
}

/// Form state of the home-service screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeServiceDraft {
    pub service: Option<HomeServiceKind>,
    pub date: Option<NaiveDate>,
    pub time_slot: Option<String>,
    pub duration_days: u32,
    pub patient_name: String,
    pub address: String,
    pub notes: String,
    pub payment_method: Option<PaymentMethod>,
}

impl Default for HomeServiceDraft {
    fn default() -> Self {
        Self {
            service: None,
            date: None,
            time_slot: None,
            duration_days: 1,
            patient_name: String::new(),
            address: String::new(),
            notes: String::new(),
            payment_method: None,
        }
    }
}

impl HomeServiceDraft {
    /// Total at the listed daily rate, in rupees.
    #[must_use]
    pub fn estimated_cost(&self) -> u32 {
        self.service
            .map_or(0, |s| s.daily_rate().saturating_mul(self.duration_days))
    }
}

/// Submission sent to the home-service endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeServiceBooking {
    pub service: HomeServiceKind,
    #[serde(with = "optional_date")]
    pub date: Option<NaiveDate>,
    pub time_slot: String,
    pub duration_days: u32,
    pub patient_name: String,
    pub address: String,
    pub notes: String,
    pub payment_method: PaymentMethod,
    pub estimated_cost: u32,
}

impl FlowDraft for HomeServiceDraft {
    type Step = HomeServiceStep;
    type Request = HomeServiceBooking;

    fn missing(&self, step: HomeServiceStep) -> Option<&'static str> {
        match step {
            HomeServiceStep::Service => self.service.is_none().then_some("choose a service"),
            HomeServiceStep::Schedule => {
                if self.date.is_none() {
                    Some("choose a start date")
                } else if self.time_slot.as_deref().is_none_or(|s| s.trim().is_empty()) {
                    Some("choose a time slot")
                } else if self.duration_days == 0 {
                    Some("duration must be at least one day")
                } else {
                    None
                }
            }
            HomeServiceStep::Address => {
                if self.patient_name.trim().is_empty() {
                    Some("enter the patient's name")
                } else if self.address.trim().is_empty() {
                    Some("enter the visit address")
                } else {
                    None
                }
            }
            HomeServiceStep::Payment => self
                .payment_method
                .is_none()
                .then_some("choose a payment method"),
            HomeServiceStep::Confirmation => None,
        }
    }

    fn build(&self) -> HomeServiceBooking {
        HomeServiceBooking {
            service: self.service.unwrap_or_default(),
            date: self.date,
            time_slot: self.time_slot.clone().unwrap_or_default(),
            duration_days: self.duration_days,
            patient_name: self.patient_name.trim().to_string(),
            address: self.address.trim().to_string(),
            notes: self.notes.trim().to_string(),
            payment_method: self.payment_method.unwrap_or_default(),
            estimated_cost: self.estimated_cost(),
        }
    }
}

pub type HomeServiceFlow = LinearFlow<HomeServiceDraft>;
