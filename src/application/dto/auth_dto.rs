//! Authentication DTOs.

use crate::domain::entities::{LoginId, Password, Role, Session};

/// Where the active session came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSource {
    /// Session file from a previous run.
    Stored,
    /// Fresh login or signup.
    SignedIn,
}

impl SessionSource {
    /// Returns human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Stored => "saved session",
            Self::SignedIn => "new sign-in",
        }
    }
}

impl std::fmt::Display for SessionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Login request data.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    /// Account kind.
    pub role: Role,
    /// Email or mobile number.
    pub login_id: LoginId,
    /// Account password.
    pub password: Password,
    /// Whether to persist the session.
    pub persist_session: bool,
}

impl LoginRequest {
    /// Creates new login request.
    #[must_use]
    pub fn new(role: Role, login_id: &str, password: Password) -> Self {
        Self {
            role,
            login_id: LoginId::parse(login_id),
            password,
            persist_session: true,
        }
    }

    /// Disables session persistence.
    #[must_use]
    pub fn without_persistence(mut self) -> Self {
        self.persist_session = false;
        self
    }
}

/// Login or signup outcome.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    /// Signed-in account.
    pub session: Session,
    /// Where the session came from.
    pub source: SessionSource,
    /// Whether the session was written to the store.
    pub session_persisted: bool,
}

impl LoginResponse {
    /// Creates new login response.
    #[must_use]
    pub const fn new(session: Session, source: SessionSource, session_persisted: bool) -> Self {
        Self {
            session,
            source,
            session_persisted,
        }
    }
}
