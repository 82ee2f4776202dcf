//! HTTP infrastructure utilities.
//!
//! This module provides:
//! - Construction of the shared `reqwest` client with a bounded timeout
//! - Classification of `reqwest` send errors

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

/// Default bound for every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Content-Type for form-urlencoded data.
pub(crate) const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Errors while setting up HTTP adapters.
#[derive(Debug, Error)]
pub enum HttpSetupError {
    /// The timeout must be positive.
    #[error("HTTP timeout must be greater than zero")]
    ZeroTimeout,

    /// The underlying client could not be created.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Builds a client whose requests fail after `timeout`.
///
/// Redirects are not followed; both the token endpoint and the article
/// service are expected to answer directly.
///
/// # Errors
///
/// Returns an error if the timeout is zero or the client cannot be created.
pub fn build_client(timeout: Duration) -> Result<Client, HttpSetupError> {
    if timeout.is_zero() {
        return Err(HttpSetupError::ZeroTimeout);
    }
    Client::builder()
        .user_agent(concat!("newsdesk/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(|e| HttpSetupError::Client(e.to_string()))
}

/// A send error reduced to what the ports care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SendFailure {
    Timeout,
    Transport(String),
}

/// Maps reqwest errors to a [`SendFailure`].
pub(crate) fn classify_send_error(error: &reqwest::Error) -> SendFailure {
    if error.is_timeout() {
        return SendFailure::Timeout;
    }

    let host = error
        .url()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string());

    if error.is_connect() {
        let message = error.to_string().to_lowercase();
        if message.contains("dns") || message.contains("resolve") {
            return SendFailure::Transport(format!("cannot resolve {host}"));
        }
        if message.contains("refused") {
            return SendFailure::Transport(format!("connection refused by {host}"));
        }
        return SendFailure::Transport(format!("cannot connect to {host}: {error}"));
    }

    SendFailure::Transport(error.to_string())
}

/// Milliseconds of `timeout`, saturating.
pub(crate) fn timeout_ms(timeout: Duration) -> u64 {
    u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)
}
