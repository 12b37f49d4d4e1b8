//! The `{success, message, data}` response envelope.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::errors::ApiError;
use crate::domain::serde_utils::lenient_bool;

/// Every endpoint answers with this shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    #[serde(default, deserialize_with = "lenient_bool::deserialize")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl Envelope {
    /// Maps the envelope to its payload.
    ///
    /// Missing, null or empty `data` yields `T::default()`.
    ///
    /// # Errors
    /// Returns [`ApiError::Rejected`] when `success` is false and
    /// [`ApiError::Parse`] when `data` does not fit `T`.
    pub fn into_result<T>(self) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Default,
    {
        if !self.success {
            return Err(ApiError::rejected(self.message));
        }

        let Some(data) = self.data else {
            return Ok(T::default());
        };
        let blank = is_blank(&data);

        match serde_json::from_value(data) {
            Ok(value) => Ok(value),
            Err(_) if blank => Ok(T::default()),
            Err(e) => Err(ApiError::parse(e.to_string())),
        }
    }
}

// PHP encodes an empty associative array as `[]`.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Doctor, DoctorStatus, UserProfile};
    use crate::domain::errors::FALLBACK_MESSAGE;
    use test_case::test_case;

    fn envelope(json: &str) -> Envelope {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_success_with_sparse_data() {
        let profile: UserProfile =
            envelope(r#"{"success":true,"data":{"id":"5","name":"Asha"}}"#)
                .into_result()
                .unwrap();

        assert_eq!(profile.id.as_u64(), 5);
        assert_eq!(profile.name, "Asha");
        assert!(profile.dob.is_none());
        assert!(profile.address.is_empty());
    }

    #[test_case(r#"{"success":true}"#; "missing data")]
    #[test_case(r#"{"success":true,"data":null}"#; "null data")]
    #[test_case(r#"{"success":"1","data":[]}"#; "php empty array")]
    fn test_absent_data_defaults(json: &str) {
        let profile: UserProfile = envelope(json).into_result().unwrap();
        assert_eq!(profile, UserProfile::default());
    }

    #[test]
    fn test_failure_uses_server_message() {
        let err = envelope(r#"{"success":false,"message":"Email already registered"}"#)
            .into_result::<UserProfile>()
            .unwrap_err();
        assert_eq!(err.user_message(), "Email already registered");
    }

    #[test_case(r#"{"success":false}"#; "absent")]
    #[test_case(r#"{"success":false,"message":"  "}"#; "blank")]
    #[test_case(r#"{"success":0,"message":null}"#; "null")]
    fn test_failure_falls_back(json: &str) {
        let err = envelope(json).into_result::<UserProfile>().unwrap_err();
        assert_eq!(err.user_message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_list_data() {
        let doctors: Vec<Doctor> = envelope(
            r#"{"success":true,"data":[{"id":1,"name":"Meera","status":"online","fee":"500"}]}"#,
        )
        .into_result()
        .unwrap();

        assert_eq!(doctors.len(), 1);
        assert_eq!(doctors[0].status, DoctorStatus::Online);
        assert!((doctors[0].fee - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mismatched_data_is_parse_error() {
        let err = envelope(r#"{"success":true,"data":42}"#)
            .into_result::<Vec<Doctor>>()
            .unwrap_err();
        assert!(matches!(err, ApiError::Parse { .. }));
    }
}
