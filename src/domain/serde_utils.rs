//! Serde helpers for the loosely typed JSON the PHP backend produces.
//!
//! The backend echoes MySQL columns straight into JSON, so numeric columns
//! arrive as strings (`"12"`), booleans as `1`/`"1"`/`"true"`, and unset
//! columns as empty strings or `null`.

use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use std::fmt;

/// Largest float that still holds every integer below it exactly (2^53).
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Record identifiers that might be strings or numbers.
pub mod string_to_u64 {
    use super::{Deserializer, Serializer, Visitor, de, fmt};

    /// Serializes an id as a number.
    ///
    /// # Errors
    ///
    /// Returns an error if the serializer fails.
    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(*value)
    }

    /// Deserializes an id from a string or number. Empty strings and `null`
    /// map to `0`, which the backend never assigns.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a string or integer, or if parsing fails.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StringOrIntVisitor;

        impl Visitor<'_> for StringOrIntVisitor {
            type Value = u64;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer representing a record id")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value)
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u64::try_from(value).map_err(|_| E::custom(format!("negative id {value}")))
            }

            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if value.fract() != 0.0 || !(0.0..=super::MAX_EXACT_FLOAT).contains(&value) {
                    return Err(E::custom(format!("id {value} is not a whole number")));
                }
                Ok(value as u64)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let value = value.trim();
                if value.is_empty() {
                    return Ok(0);
                }
                value.parse::<u64>().map_err(de::Error::custom)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(0)
            }
        }

        deserializer.deserialize_any(StringOrIntVisitor)
    }
}

/// Floating point columns (fees, ratings) that might be strings or numbers.
pub mod lenient_f64 {
    use super::{Deserializer, Visitor, de, fmt};

    /// Deserializes a float; blank strings and `null` map to `0.0`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not numeric.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FloatVisitor;

        impl Visitor<'_> for FloatVisitor {
            type Value = f64;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number or numeric string")
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value)
            }

            #[allow(clippy::cast_precision_loss)]
            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value as f64)
            }

            #[allow(clippy::cast_precision_loss)]
            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value as f64)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let value = value.trim();
                if value.is_empty() {
                    return Ok(0.0);
                }
                value.parse::<f64>().map_err(de::Error::custom)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(0.0)
            }
        }

        deserializer.deserialize_any(FloatVisitor)
    }
}

/// Small counters (age, years of experience) that might be strings or numbers.
pub mod lenient_u32 {
    use super::{Deserializer, Visitor, de, fmt};

    /// Deserializes a counter; blank strings and `null` map to `0`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a non-negative integer.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CounterVisitor;

        impl Visitor<'_> for CounterVisitor {
            type Value = u32;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a non-negative integer or numeric string")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u32::try_from(value).map_err(de::Error::custom)
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u32::try_from(value).map_err(de::Error::custom)
            }

            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if value.fract() != 0.0 || !(0.0..=f64::from(u32::MAX)).contains(&value) {
                    return Err(E::custom(format!("{value} is not a whole number")));
                }
                Ok(value as u32)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let value = value.trim();
                if value.is_empty() {
                    return Ok(0);
                }
                value.parse::<u32>().map_err(de::Error::custom)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(0)
            }
        }

        deserializer.deserialize_any(CounterVisitor)
    }
}

/// Flags encoded as `true`, `1`, `"1"`, `"true"` or `"yes"`.
pub mod lenient_bool {
    use super::{Deserializer, Visitor, de, fmt};

    /// Deserializes a flag. Anything unrecognised counts as `false`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is an array or object.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FlagVisitor;

        impl Visitor<'_> for FlagVisitor {
            type Value = bool;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a boolean, 0/1, or boolean-like string")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value)
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value != 0)
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value != 0)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(matches!(
                    value.trim().to_ascii_lowercase().as_str(),
                    "1" | "true" | "yes"
                ))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(false)
            }
        }

        deserializer.deserialize_any(FlagVisitor)
    }
}

/// Text columns where `null` should read as an empty string.
pub mod null_as_empty {
    use serde::{Deserialize, Deserializer};

    /// Deserializes a string, mapping `null` to `""`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a string or `null`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }
}

/// Optional `YYYY-MM-DD` dates; blank strings and MySQL zero dates are `None`.
pub mod optional_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    /// Serializes a date as `YYYY-MM-DD`, or an empty string when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the serializer fails.
    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format(FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    /// Deserializes an optional date.
    ///
    /// # Errors
    ///
    /// Returns an error if a non-blank value is not a valid date.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        let raw = raw.trim();
        if raw.is_empty() || raw.starts_with("0000-00-00") {
            return Ok(None);
        }
        let date_part = raw.split_whitespace().next().unwrap_or(raw);
        NaiveDate::parse_from_str(date_part, FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde::Deserialize;
    use test_case::test_case;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(with = "super::string_to_u64", default)]
        id: u64,
        #[serde(deserialize_with = "super::lenient_f64::deserialize", default)]
        fee: f64,
        #[serde(deserialize_with = "super::lenient_u32::deserialize", default)]
        age: u32,
        #[serde(deserialize_with = "super::lenient_bool::deserialize", default)]
        active: bool,
        #[serde(deserialize_with = "super::null_as_empty::deserialize", default)]
        note: String,
        #[serde(with = "super::optional_date", default)]
        dob: Option<NaiveDate>,
    }

    #[test]
    fn test_string_columns_are_coerced() {
        let row: Row = serde_json::from_str(
            r#"{"id":"42","fee":"499.50","age":"31","active":"1","note":null,"dob":"1990-04-12"}"#,
        )
        .unwrap();

        assert_eq!(row.id, 42);
        assert!((row.fee - 499.5).abs() < f64::EPSILON);
        assert_eq!(row.age, 31);
        assert!(row.active);
        assert_eq!(row.note, "");
        assert_eq!(row.dob, NaiveDate::from_ymd_opt(1990, 4, 12));
    }

    #[test]
    fn test_missing_columns_use_defaults() {
        let row: Row = serde_json::from_str("{}").unwrap();

        assert_eq!(row.id, 0);
        assert_eq!(row.age, 0);
        assert!(!row.active);
        assert_eq!(row.dob, None);
    }

    #[test_case(r#"{"dob":""}"# ; "blank")]
    #[test_case(r#"{"dob":"0000-00-00"}"# ; "mysql zero date")]
    #[test_case(r#"{"dob":null}"# ; "null")]
    fn test_unset_dates_are_none(json: &str) {
        let row: Row = serde_json::from_str(json).unwrap();
        assert_eq!(row.dob, None);
    }

    #[test_case("true", true)]
    #[test_case("\"yes\"", true)]
    #[test_case("0", false)]
    #[test_case("\"false\"", false)]
    fn test_flag_forms(value: &str, expected: bool) {
        let row: Row = serde_json::from_str(&format!(r#"{{"active":{value}}}"#)).unwrap();
        assert_eq!(row.active, expected);
    }

    #[test]
    fn test_whole_floats_are_accepted() {
        let row: Row = serde_json::from_str(r#"{"id":5.0,"age":12.0}"#).unwrap();
        assert_eq!(row.id, 5);
        assert_eq!(row.age, 12);
    }

    #[test_case(r#"{"id":5.5}"# ; "fractional id")]
    #[test_case(r#"{"age":12.25}"# ; "fractional age")]
    #[test_case(r#"{"id":-3.0}"# ; "negative id")]
    fn test_fractional_counts_are_errors(json: &str) {
        assert!(serde_json::from_str::<Row>(json).is_err());
    }

    #[test]
    fn test_malformed_number_is_an_error() {
        let row = serde_json::from_str::<Row>(r#"{"fee":"abc"}"#);
        assert!(row.is_err());
    }
}
