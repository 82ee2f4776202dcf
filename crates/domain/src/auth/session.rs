//! The in-memory session record.
//!
//! A [`Session`] holds at most one [`TokenSet`] and at most one set of
//! [`Credentials`]. Because the refresh token and the expiry live inside the
//! token set, a session can never carry a refresh token without an access
//! token, nor an access token without an expiry.

use chrono::{DateTime, Utc};

use super::types::{Credentials, TokenResponse, TokenSet};

/// A user's current authentication state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    credentials: Option<Credentials>,
    tokens: Option<TokenSet>,
}

impl Session {
    /// Creates an empty session.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            credentials: None,
            tokens: None,
        }
    }

    /// Returns true if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.credentials.is_none() && self.tokens.is_none()
    }

    /// The current access token.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.access_token.as_str())
    }

    /// The current refresh token.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.tokens
            .as_ref()
            .and_then(|t| t.refresh_token.as_deref())
    }

    /// When the access token expires.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.tokens.as_ref().map(|t| t.expires_at)
    }

    /// The logged-in username, if credentials are retained.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.credentials.as_ref().map(Credentials::username)
    }

    /// Retained credentials for degraded re-authentication.
    #[must_use]
    pub const fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// The held token set.
    #[must_use]
    pub const fn tokens(&self) -> Option<&TokenSet> {
        self.tokens.as_ref()
    }

    /// Replaces the whole session with a fresh login result.
    ///
    /// `credentials` is `None` when the caller chose not to retain the
    /// password.
    pub fn commit_login(&mut self, credentials: Option<Credentials>, response: TokenResponse) {
        self.credentials = credentials;
        self.tokens = Some(response.into());
    }

    /// Applies a refreshed token in place.
    ///
    /// A response without a refresh token keeps the one already held.
    pub fn commit_refresh(&mut self, response: TokenResponse) {
        let previous_refresh = self.tokens.take().and_then(|t| t.refresh_token);
        let mut tokens = TokenSet::from(response);
        if tokens.refresh_token.is_none() {
            tokens.refresh_token = previous_refresh;
        }
        self.tokens = Some(tokens);
    }

    /// Clears every field. Idempotent.
    pub fn clear(&mut self) {
        self.credentials = None;
        self.tokens = None;
    }
}
