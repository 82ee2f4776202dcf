//! The gate run before every downstream API call.

use std::sync::Arc;

use newsdesk_domain::{AuthError, Session, token_preview};
use tracing::{debug, info, warn};

use super::refresher::TokenRefresher;
use crate::ports::Clock;

/// Ensures a session carries a non-expired access token.
///
/// Refresh is strictly lazy: it only happens when a call finds the token
/// expired, and at most once per call.
#[derive(Clone)]
pub struct TokenGuard {
    refresher: TokenRefresher,
    clock: Arc<dyn Clock>,
}

impl TokenGuard {
    /// Creates a guard.
    #[must_use]
    pub fn new(refresher: TokenRefresher, clock: Arc<dyn Clock>) -> Self {
        Self { refresher, clock }
    }

    /// Makes sure `session` holds a usable access token.
    ///
    /// The clock is read exactly once. An unexpired token is left untouched
    /// and no network call is made.
    ///
    /// # Errors
    /// - [`AuthError::NotAuthenticated`] if no access token is held.
    /// - [`AuthError::SessionExpired`] if renewal failed for good; the session
    ///   has been cleared.
    /// - [`AuthError::ProviderUnavailable`] if the provider could not be
    ///   reached; the session is left as it was so the call can be retried.
    pub async fn ensure_valid(&self, session: &mut Session) -> Result<(), AuthError> {
        let now = self.clock.now();

        let Some(tokens) = session.tokens() else {
            return Err(AuthError::NotAuthenticated);
        };
        if !tokens.is_expired_at(now) {
            return Ok(());
        }

        debug!(
            expired_for_secs = -tokens.seconds_until_expiry(now),
            "access token expired"
        );

        match self.refresher.refresh(session).await {
            Ok(response) => {
                info!(
                    token = %token_preview(&response.access_token),
                    expires_in = response.expires_in,
                    "access token refreshed"
                );
                session.commit_refresh(response);
                Ok(())
            }
            Err(error @ AuthError::ProviderUnavailable { .. }) => Err(error),
            Err(error) => {
                warn!(
                    username = session.username().unwrap_or(""),
                    %error,
                    "renewal failed, clearing session"
                );
                session.clear();
                Err(AuthError::SessionExpired)
            }
        }
    }
}
