//! Authentication error taxonomy

use thiserror::Error;

/// Errors surfaced by the token lifecycle and the article client.
///
/// Every variant is a classified outcome; raw transport errors never reach
/// callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The identity provider rejected the username or password.
    #[error("invalid credentials: {message}")]
    InvalidCredentials {
        /// Error description.
        message: String,
    },

    /// The refresh path is exhausted; the session has been cleared.
    #[error("session expired")]
    SessionExpired,

    /// The identity provider could not be reached or answered garbage.
    #[error("identity provider unavailable: {message}")]
    ProviderUnavailable {
        /// Error description.
        message: String,
    },

    /// A guarded call was made without an access token.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The article service failed after a valid token was presented.
    #[error("article fetch failed: {message}")]
    ArticleFetchFailed {
        /// Error description.
        message: String,
    },
}

impl AuthError {
    /// Returns true if the user has to log in again.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::SessionExpired | Self::NotAuthenticated)
    }

    /// Human-readable message for the front end.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidCredentials { .. } => "Login failed. Check your username and password.",
            Self::SessionExpired => "Your session has expired. Please log in again.",
            Self::ProviderUnavailable { .. } => {
                "The login service is unavailable. Please try again."
            }
            Self::NotAuthenticated => "Please log in to continue.",
            Self::ArticleFetchFailed { .. } => "Could not load the article. Please try again.",
        }
    }
}
