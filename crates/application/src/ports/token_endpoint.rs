//! Identity provider token endpoint port.

use async_trait::async_trait;
use newsdesk_domain::{Credentials, TokenResponse};
use thiserror::Error;

/// What went wrong talking to the token endpoint.
///
/// This is a transport-level description; the auth services decide what it
/// means for the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenEndpointError {
    /// The endpoint answered with a non-200 status.
    #[error("token endpoint rejected the grant with status {status}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Error detail from the body, if the provider sent one.
        detail: Option<String>,
    },

    /// No answer within the configured timeout.
    #[error("token endpoint timed out after {timeout_ms} ms")]
    Timeout {
        /// The timeout that elapsed.
        timeout_ms: u64,
    },

    /// Connection-level failure.
    #[error("cannot reach token endpoint: {0}")]
    Transport(String),

    /// A 200 answer whose body is not a usable token.
    #[error("malformed token response: {0}")]
    Malformed(String),
}

/// Port for the OAuth2 token endpoint.
///
/// Implementations compute [`TokenResponse::expires_at`] at the moment the
/// response is received.
#[async_trait]
pub trait TokenEndpoint: Send + Sync {
    /// Exchanges a username and password for a token pair (password grant).
    async fn password_grant(
        &self,
        credentials: &Credentials,
    ) -> Result<TokenResponse, TokenEndpointError>;

    /// Exchanges a refresh token for a renewed access token (refresh grant).
    async fn refresh_grant(&self, refresh_token: &str)
    -> Result<TokenResponse, TokenEndpointError>;
}
