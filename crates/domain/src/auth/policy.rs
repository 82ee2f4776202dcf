//! How a session may be renewed once its access token expires.

use serde::{Deserialize, Serialize};

/// Renewal strategy for expired sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPolicy {
    /// Use the refresh token when one was issued, otherwise re-submit the
    /// stored username and password.
    #[default]
    PasswordFallback,
    /// Only ever use refresh tokens. The password is dropped right after
    /// login and a session without a refresh token cannot be renewed.
    RefreshTokenOnly,
}

impl RefreshPolicy {
    /// Returns true if the password is kept in the session after login.
    #[must_use]
    pub const fn retains_password(self) -> bool {
        matches!(self, Self::PasswordFallback)
    }
}
