//! Home nursing service catalogue.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HomeServiceKind {
    #[default]
    NursingCare,
    Physiotherapy,
    ElderCare,
    InjectionDressing,
    LabSampleCollection,
}

impl HomeServiceKind {
    pub const ALL: [Self; 5] = [
        Self::NursingCare,
        Self::Physiotherapy,
        Self::ElderCare,
        Self::InjectionDressing,
        Self::LabSampleCollection,
    ];

    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().replace(['-', '_', '/', ' '], "").as_str() {
            "physiotherapy" | "physio" => Self::Physiotherapy,
            "eldercare" => Self::ElderCare,
            "injectiondressing" | "injection" | "dressing" => Self::InjectionDressing,
            "labsamplecollection" | "samplecollection" | "lab" => Self::LabSampleCollection,
            _ => Self::NursingCare,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NursingCare => "Nursing Care",
            Self::Physiotherapy => "Physiotherapy",
            Self::ElderCare => "Elder Care",
            Self::InjectionDressing => "Injection / Dressing",
            Self::LabSampleCollection => "Lab Sample Collection",
        }
    }

    /// Listed price per visit day, in rupees.
    #[must_use]
    pub const fn daily_rate(self) -> u32 {
        match self {
            Self::NursingCare => 1200,
            Self::Physiotherapy => 800,
            Self::ElderCare => 1500,
            Self::InjectionDressing => 300,
            Self::LabSampleCollection => 200,
        }
    }
}

impl From<String> for HomeServiceKind {
    fn from(value: String) -> Self {
        Self::from_wire(&value)
    }
}

impl From<HomeServiceKind> for String {
    fn from(value: HomeServiceKind) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for HomeServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
