//! Identity-provider error taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! `ProviderError` never escapes the session operations: the manager turns it
//! into a destructive notification. Its `user_message` is what the toast shows.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Errors produced by identity-provider calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The provider answered and refused the request (bad password, duplicate
    /// email, unconfirmed account, ...).
    #[error("{}", .message.as_deref().unwrap_or("identity service rejected the request"))]
    Rejected { status: Option<u16>, message: Option<String> },

    /// The request never produced a usable HTTP response.
    #[error("identity service request failed: {0}")]
    Transport(String),

    /// The provider answered with a body we could not decode.
    #[error("identity service response could not be decoded: {0}")]
    Decode(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

impl ProviderError {
    /// Rejection carrying a provider message and no HTTP status.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected { status: None, message: Some(message.into()) }
    }

    /// Message suitable for a user-facing notification.
    ///
    /// Returns `None` when the provider gave no message, so callers can fall
    /// back to their own wording.
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Rejected { message, .. } => message
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_owned),
            other => Some(other.to_string()),
        }
    }

    /// HTTP status reported by the provider, when there was one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => *status,
            _ => None,
        }
    }
}
