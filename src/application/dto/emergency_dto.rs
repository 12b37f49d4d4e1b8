//! Emergency request DTOs.

use crate::domain::entities::EmergencyKind;

/// Fields collected on the emergency screen. Contact details default to the
/// signed-in account when left unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmergencyInput {
    pub kind: EmergencyKind,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub contact_name: Option<String>,
    pub contact_mobile: Option<String>,
    pub notes: String,
}

impl EmergencyInput {
    #[must_use]
    pub fn new(kind: EmergencyKind, location: impl Into<String>) -> Self {
        Self {
            kind,
            location: location.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }
}
