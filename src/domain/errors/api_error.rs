//! Remote call error types.

use thiserror::Error;

/// Toast text shown when the server rejects a call without a message.
pub const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

/// Toast text shown for every transport failure.
pub const NETWORK_MESSAGE: &str = "Network error. Please check your connection and try again.";

/// Toast text shown when a response cannot be understood.
pub const PARSE_MESSAGE: &str = "Received an unexpected response from the server.";

/// Coarse grouping of [`ApiError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The request never produced a usable response.
    Transport,
    /// The server answered with `success = false`.
    Rejected,
    /// The response body did not match the envelope contract.
    Parse,
    /// Failure raised on the client before any request was sent.
    Local,
}

/// Errors raised by use cases and the API client.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("server returned HTTP {status}")]
    Http { status: u16 },

    #[error("request rejected: {message}")]
    Rejected { message: String },

    #[error("failed to parse response: {message}")]
    Parse { message: String },

    #[error("no signed-in user")]
    NotSignedIn,

    #[error("another request is already in progress")]
    InFlight,

    #[error("this action requires a {expected} account")]
    WrongRole { expected: &'static str },

    #[error("session storage error: {0}")]
    Storage(#[from] super::StorageError),

    #[error(transparent)]
    Flow(#[from] super::FlowError),

    #[error("unexpected error: {message}")]
    Unexpected { message: String },
}

impl ApiError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a rejection from the envelope `message`, substituting the
    /// fallback text when it is absent or blank.
    #[must_use]
    pub fn rejected(message: Option<String>) -> Self {
        let message = message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
        Self::Rejected { message }
    }

    /// Creates parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns the error category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Network { .. } | Self::Http { .. } => ErrorCategory::Transport,
            Self::Rejected { .. } => ErrorCategory::Rejected,
            Self::Parse { .. } => ErrorCategory::Parse,
            Self::NotSignedIn
            | Self::InFlight
            | Self::WrongRole { .. }
            | Self::Storage(_)
            | Self::Flow(_)
            | Self::Unexpected { .. } => ErrorCategory::Local,
        }
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self.category(), ErrorCategory::Transport)
    }

    /// Returns the text to show the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network { .. } | Self::Http { .. } => NETWORK_MESSAGE.to_string(),
            Self::Rejected { message } => message.clone(),
            Self::Parse { .. } => PARSE_MESSAGE.to_string(),
            Self::NotSignedIn => "Please log in to continue.".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_keeps_server_message() {
        let err = ApiError::rejected(Some("Invalid password".to_string()));
        assert_eq!(err.user_message(), "Invalid password");
        assert_eq!(err.category(), ErrorCategory::Rejected);
    }

    #[test]
    fn test_rejected_without_message_uses_fallback() {
        assert_eq!(ApiError::rejected(None).user_message(), FALLBACK_MESSAGE);
        assert_eq!(
            ApiError::rejected(Some("   ".to_string())).user_message(),
            FALLBACK_MESSAGE
        );
    }

    #[test]
    fn test_transport_errors_share_generic_message() {
        let network = ApiError::network("connection refused");
        let http = ApiError::Http { status: 502 };

        assert!(network.is_network_error());
        assert!(http.is_network_error());
        assert_eq!(network.user_message(), NETWORK_MESSAGE);
        assert_eq!(http.user_message(), NETWORK_MESSAGE);
    }

    #[test]
    fn test_parse_error_category() {
        let err = ApiError::parse("expected value at line 1");
        assert_eq!(err.category(), ErrorCategory::Parse);
        assert_eq!(err.user_message(), PARSE_MESSAGE);
    }
}
