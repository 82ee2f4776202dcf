//! Initial token acquisition (password grant).

use std::sync::Arc;

use newsdesk_domain::{AuthError, Credentials, TokenResponse, token_preview};
use tracing::{info, warn};

use crate::ports::{TokenEndpoint, TokenEndpointError};

/// Exchanges a username and password for an initial token pair.
///
/// The acquirer never touches a session; the caller commits the result.
#[derive(Clone)]
pub struct TokenAcquirer {
    endpoint: Arc<dyn TokenEndpoint>,
}

impl TokenAcquirer {
    /// Creates an acquirer talking to `endpoint`.
    #[must_use]
    pub fn new(endpoint: Arc<dyn TokenEndpoint>) -> Self {
        Self { endpoint }
    }

    /// Runs the password grant.
    ///
    /// # Errors
    /// - [`AuthError::InvalidCredentials`] if the provider answers non-200.
    /// - [`AuthError::ProviderUnavailable`] on transport failure, timeout or
    ///   an unusable 200 body.
    pub async fn acquire(&self, credentials: &Credentials) -> Result<TokenResponse, AuthError> {
        match self.endpoint.password_grant(credentials).await {
            Ok(response) => {
                info!(
                    username = credentials.username(),
                    token = %token_preview(&response.access_token),
                    expires_in = response.expires_in,
                    has_refresh_token = response.refresh_token.is_some(),
                    "password grant succeeded"
                );
                Ok(response)
            }
            Err(TokenEndpointError::Rejected { status, detail }) => {
                warn!(
                    username = credentials.username(),
                    status,
                    detail = detail.as_deref().unwrap_or(""),
                    "password grant rejected"
                );
                Err(AuthError::InvalidCredentials {
                    message: detail.unwrap_or_else(|| format!("status {status}")),
                })
            }
            Err(error) => {
                warn!(username = credentials.username(), %error, "password grant failed");
                Err(AuthError::ProviderUnavailable {
                    message: error.to_string(),
                })
            }
        }
    }
}
