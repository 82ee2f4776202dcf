//! Credential and token types

use chrono::{DateTime, Duration, Utc};
use secrecy::{Secret, SecretString};

use crate::error::{DomainError, DomainResult};

/// Username and password submitted at login.
///
/// The password is wrapped in a [`SecretString`] so that it never shows up
/// in `Debug` output or log lines.
#[derive(Debug, Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    /// Creates credentials, rejecting empty fields.
    ///
    /// # Errors
    /// Returns [`DomainError::MissingCredential`] if the username or the
    /// password is empty.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> DomainResult<Self> {
        let username = username.into();
        let password = password.into();

        if username.trim().is_empty() {
            return Err(DomainError::MissingCredential("username"));
        }
        if password.is_empty() {
            return Err(DomainError::MissingCredential("password"));
        }

        Ok(Self {
            username,
            password: Secret::new(password),
        })
    }

    /// The username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The password, still wrapped.
    #[must_use]
    pub const fn password(&self) -> &SecretString {
        &self.password
    }
}

/// A successful token endpoint response.
///
/// `expires_in` is relative to the moment the response was received; the
/// absolute `expires_at` is fixed at that moment and never recomputed.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenResponse {
    /// The access token string.
    pub access_token: String,
    /// Refresh token, if the provider issued one.
    pub refresh_token: Option<String>,
    /// Lifetime in seconds as reported by the provider.
    pub expires_in: u64,
    /// Absolute expiry computed at receipt.
    pub expires_at: DateTime<Utc>,
}

impl TokenResponse {
    /// Builds a response received at `received_at`.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidTokenResponse`] if the access token is
    /// empty or `expires_in` is zero or out of range.
    pub fn received(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_in: u64,
        received_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let access_token = access_token.into();
        if access_token.is_empty() {
            return Err(DomainError::InvalidTokenResponse(
                "access_token is empty".to_string(),
            ));
        }
        if expires_in == 0 {
            return Err(DomainError::InvalidTokenResponse(
                "expires_in must be positive".to_string(),
            ));
        }

        let expires_at = i64::try_from(expires_in)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| received_at.checked_add_signed(lifetime))
            .ok_or_else(|| {
                DomainError::InvalidTokenResponse(format!("expires_in out of range: {expires_in}"))
            })?;

        Ok(Self {
            access_token,
            refresh_token: refresh_token.filter(|token| !token.is_empty()),
            expires_in,
            expires_at,
        })
    }
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &token_preview(&self.access_token))
            .field("refresh_token", &self.refresh_token.as_deref().map(token_preview))
            .field("expires_in", &self.expires_in)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Tokens held by an authenticated session.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSet {
    /// The bearer credential for API calls.
    pub access_token: String,
    /// Refresh token, absent in degraded mode.
    pub refresh_token: Option<String>,
    /// When `access_token` stops being valid.
    pub expires_at: DateTime<Utc>,
}

impl TokenSet {
    /// Returns true if the access token is expired at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Seconds left until expiry at `now` (negative once expired).
    #[must_use]
    pub fn seconds_until_expiry(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds()
    }
}

impl From<TokenResponse> for TokenSet {
    fn from(response: TokenResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_at: response.expires_at,
        }
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSet")
            .field("access_token", &token_preview(&self.access_token))
            .field("refresh_token", &self.refresh_token.as_deref().map(token_preview))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Get a preview of a token (first 8 chars + ...), safe to log.
#[must_use]
pub fn token_preview(token: &str) -> String {
    if token.chars().count() > 12 {
        let head: String = token.chars().take(8).collect();
        format!("{head}...")
    } else {
        token.to_string()
    }
}
