//! Login credential value objects.

use std::fmt;

use serde::{Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Account password, wiped from memory on drop and masked in logs.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Password {
    value: String,
}

impl Password {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns password as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Returns masked password for display.
    #[must_use]
    pub fn masked(&self) -> String {
        "*".repeat(self.value.chars().count().min(8))
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Password")
            .field("value", &self.masked())
            .finish()
    }
}

impl Serialize for Password {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.value)
    }
}

/// Email address or mobile number used to sign in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginId {
    Email(String),
    Mobile(String),
}

impl LoginId {
    /// Classifies free-form input: anything containing `@` is an email.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.contains('@') {
            Self::Email(input.to_lowercase())
        } else {
            Self::Mobile(input.chars().filter(|c| !c.is_whitespace()).collect())
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Email(value) | Self::Mobile(value) => value,
        }
    }
}

impl fmt::Display for LoginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
