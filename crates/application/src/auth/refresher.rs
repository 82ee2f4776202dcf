//! Token renewal without user interaction.
//!
//! Two paths exist. The preferred one sends a refresh grant with the
//! session's refresh token. The degraded one, used when the provider issued
//! no refresh token, re-submits the stored username and password through the
//! [`TokenAcquirer`]. Each call makes at most one network attempt.

use std::sync::Arc;

use newsdesk_domain::{AuthError, RefreshPolicy, Session, TokenResponse};
use tracing::{debug, warn};

use super::acquirer::TokenAcquirer;
use crate::ports::{TokenEndpoint, TokenEndpointError};

/// Renews the access token held by a session.
#[derive(Clone)]
pub struct TokenRefresher {
    endpoint: Arc<dyn TokenEndpoint>,
    acquirer: TokenAcquirer,
    policy: RefreshPolicy,
}

impl TokenRefresher {
    /// Creates a refresher sharing `endpoint` with its fallback acquirer.
    #[must_use]
    pub fn new(endpoint: Arc<dyn TokenEndpoint>, policy: RefreshPolicy) -> Self {
        Self {
            acquirer: TokenAcquirer::new(Arc::clone(&endpoint)),
            endpoint,
            policy,
        }
    }

    /// Obtains a renewed token for `session`. Does not mutate it.
    ///
    /// # Errors
    /// - [`AuthError::SessionExpired`] if the refresh token (or the stored
    ///   password) is rejected, or nothing usable for renewal is held.
    /// - [`AuthError::ProviderUnavailable`] on transport failure or timeout.
    pub async fn refresh(&self, session: &Session) -> Result<TokenResponse, AuthError> {
        if let Some(refresh_token) = session.refresh_token() {
            debug!("renewing access token with refresh grant");
            return self
                .endpoint
                .refresh_grant(refresh_token)
                .await
                .map_err(|error| match error {
                    TokenEndpointError::Rejected { status, .. } => {
                        warn!(status, "refresh grant rejected");
                        AuthError::SessionExpired
                    }
                    other => {
                        warn!(error = %other, "refresh grant failed");
                        AuthError::ProviderUnavailable {
                            message: other.to_string(),
                        }
                    }
                });
        }

        match (self.policy, session.credentials()) {
            (RefreshPolicy::PasswordFallback, Some(credentials)) => {
                debug!(
                    username = credentials.username(),
                    "no refresh token held, re-submitting stored credentials"
                );
                self.acquirer
                    .acquire(credentials)
                    .await
                    .map_err(|error| match error {
                        AuthError::InvalidCredentials { .. } => AuthError::SessionExpired,
                        other => other,
                    })
            }
            _ => {
                debug!(policy = ?self.policy, "session holds nothing usable for renewal");
                Err(AuthError::SessionExpired)
            }
        }
    }
}
