//! Signed-in session.

use serde::{Deserialize, Serialize};

use super::UserId;

/// Kind of account behind a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Patient,
    Doctor,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Doctor => "doctor",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifiers of the signed-in account, kept in the local session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub role: Role,
    pub user_id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
}

impl Session {
    #[must_use]
    pub fn new(role: Role, user_id: UserId, name: impl Into<String>) -> Self {
        Self {
            role,
            user_id,
            name: name.into(),
            email: String::new(),
            mobile: String::new(),
        }
    }

    #[must_use]
    pub fn with_contact(mut self, email: impl Into<String>, mobile: impl Into<String>) -> Self {
        self.email = email.into();
        self.mobile = mobile.into();
        self
    }

    #[must_use]
    pub const fn is_doctor(&self) -> bool {
        matches!(self.role, Role::Doctor)
    }

    /// Name used in greetings.
    #[must_use]
    pub fn greeting_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() { &self.email } else { name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_toml_shape() {
        let session = Session::new(Role::Doctor, UserId(12), "Meera")
            .with_contact("meera@example.com", "9811111111");
        let text = toml::to_string(&session).unwrap();

        assert!(text.contains("role = \"doctor\""));
        assert!(text.contains("user_id = 12"));

        let parsed: Session = toml::from_str(&text).unwrap();
        assert_eq!(parsed, session);
        assert!(parsed.is_doctor());
    }

    #[test]
    fn test_greeting_falls_back_to_email() {
        let session =
            Session::new(Role::Patient, UserId(1), " ").with_contact("asha@example.com", "");
        assert_eq!(session.greeting_name(), "asha@example.com");
    }
}
