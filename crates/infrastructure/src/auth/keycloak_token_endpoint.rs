//! Keycloak token endpoint adapter.
//!
//! Implements the password and refresh grants against
//! `{base}/realms/{realm}/protocol/openid-connect/token` with form-encoded
//! bodies.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use newsdesk_application::ports::{Clock, TokenEndpoint, TokenEndpointError};
use newsdesk_domain::{Credentials, IdentityProvider, TokenResponse};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::debug;

use crate::http::{
    FORM_CONTENT_TYPE, HttpSetupError, SendFailure, build_client, classify_send_error, timeout_ms,
};

/// Token endpoint success body. Extra fields are ignored.
#[derive(Debug, Deserialize)]
struct TokenEndpointResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    expires_in: u64,
}

/// `OAuth2` error body.
#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Token endpoint adapter for a Keycloak realm.
pub struct KeycloakTokenEndpoint {
    http_client: Client,
    provider: IdentityProvider,
    clock: Arc<dyn Clock>,
    timeout: Duration,
}

impl KeycloakTokenEndpoint {
    /// Creates an adapter with its own client bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(
        provider: IdentityProvider,
        clock: Arc<dyn Clock>,
        timeout: Duration,
    ) -> Result<Self, HttpSetupError> {
        Ok(Self::with_client(
            build_client(timeout)?,
            provider,
            clock,
            timeout,
        ))
    }

    /// Creates an adapter around an existing client.
    ///
    /// `timeout` is only used for error reporting; the client enforces it.
    #[must_use]
    pub fn with_client(
        http_client: Client,
        provider: IdentityProvider,
        clock: Arc<dyn Clock>,
        timeout: Duration,
    ) -> Self {
        Self {
            http_client,
            provider,
            clock,
            timeout,
        }
    }

    async fn post_grant(
        &self,
        grant_type: &str,
        params: &[(&str, &str)],
    ) -> Result<TokenResponse, TokenEndpointError> {
        let mut form = vec![
            ("grant_type", grant_type),
            ("client_id", self.provider.client_id()),
        ];
        form.extend_from_slice(params);

        let body = serde_urlencoded::to_string(&form)
            .map_err(|e| TokenEndpointError::Transport(format!("failed to encode form: {e}")))?;

        let response = self
            .http_client
            .post(self.provider.token_endpoint().clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| self.map_error(&e))?;

        let received_at = self.clock.now();
        let status = response.status();

        if status != StatusCode::OK {
            let error_text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<TokenErrorResponse>(&error_text)
                .ok()
                .map(|e| e.error_description.unwrap_or(e.error));
            debug!(
                grant_type,
                status = status.as_u16(),
                detail = detail.as_deref().unwrap_or(""),
                "token endpoint answered non-200"
            );
            return Err(TokenEndpointError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        let token_response: TokenEndpointResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                TokenEndpointError::Malformed(e.to_string())
            } else {
                self.map_error(&e)
            }
        })?;

        TokenResponse::received(
            token_response.access_token,
            token_response.refresh_token,
            token_response.expires_in,
            received_at,
        )
        .map_err(|e| TokenEndpointError::Malformed(e.to_string()))
    }

    fn map_error(&self, error: &reqwest::Error) -> TokenEndpointError {
        match classify_send_error(error) {
            SendFailure::Timeout => TokenEndpointError::Timeout {
                timeout_ms: timeout_ms(self.timeout),
            },
            SendFailure::Transport(message) => TokenEndpointError::Transport(message),
        }
    }
}

#[async_trait]
impl TokenEndpoint for KeycloakTokenEndpoint {
    async fn password_grant(
        &self,
        credentials: &Credentials,
    ) -> Result<TokenResponse, TokenEndpointError> {
        self.post_grant(
            "password",
            &[
                ("username", credentials.username()),
                ("password", credentials.password().expose_secret().as_str()),
            ],
        )
        .await
    }

    async fn refresh_grant(
        &self,
        refresh_token: &str,
    ) -> Result<TokenResponse, TokenEndpointError> {
        self.post_grant("refresh_token", &[("refresh_token", refresh_token)])
            .await
    }
}
