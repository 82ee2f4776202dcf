//! Newsdesk - composition root
//!
//! Loads configuration, installs tracing and wires the reqwest adapters
//! into the token lifecycle services.
//!
//! ```no_run
//! # async fn run() -> Result<(), newsdesk::BootstrapError> {
//! let config = newsdesk::AppConfig::load()?;
//! newsdesk::telemetry::init_tracing(&config.logging)?;
//! let app = newsdesk::Newsdesk::from_config(&config)?;
//!
//! let mut dashboard = app.dashboard();
//! let state = dashboard.login("alice", "secret").await;
//! # let _ = state;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod telemetry;

use std::sync::Arc;

use newsdesk_application::ports::Clock;
use newsdesk_application::{ArticleClient, Dashboard, TokenManager};
use newsdesk_domain::DomainError;
use newsdesk_infrastructure::{
    HttpSetupError, KeycloakTokenEndpoint, ReqwestArticleApi, SystemClock, build_client,
};
use tracing::info;

pub use config::AppConfig;
pub use telemetry::TelemetryError;

/// Errors raised while starting up.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    /// An endpoint address is invalid.
    #[error("endpoint error: {0}")]
    Endpoint(#[from] DomainError),

    /// The HTTP client could not be built.
    #[error("http client error: {0}")]
    Http(#[from] HttpSetupError),

    /// Tracing could not be installed.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
}

/// The wired service graph.
#[derive(Clone)]
pub struct Newsdesk {
    tokens: TokenManager,
    articles: ArticleClient,
}

impl Newsdesk {
    /// Builds the services against the wall clock.
    ///
    /// # Errors
    ///
    /// Returns an error if an endpoint is invalid or the HTTP client fails to build.
    pub fn from_config(config: &AppConfig) -> Result<Self, BootstrapError> {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Builds the services against `clock`.
    ///
    /// # Errors
    ///
    /// Returns an error if an endpoint is invalid or the HTTP client fails to build.
    pub fn with_clock(config: &AppConfig, clock: Arc<dyn Clock>) -> Result<Self, BootstrapError> {
        let provider = config.identity_provider()?;
        let service = config.article_service()?;
        let timeout = config.timeout();
        let client = build_client(timeout)?;

        info!(
            token_endpoint = %provider.token_endpoint(),
            articles = %service.titles_url(),
            timeout_secs = config.http.timeout_secs,
            policy = ?config.auth.refresh_policy,
            "newsdesk services configured"
        );

        let endpoint = KeycloakTokenEndpoint::with_client(
            client.clone(),
            provider,
            Arc::clone(&clock),
            timeout,
        );
        let tokens = TokenManager::new(Arc::new(endpoint), clock, config.auth.refresh_policy);
        let api = ReqwestArticleApi::with_client(client, service, timeout);
        let articles = ArticleClient::new(Arc::new(api), tokens.clone());

        Ok(Self { tokens, articles })
    }

    /// Token lifecycle services.
    #[must_use]
    pub const fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// Guarded article client.
    #[must_use]
    pub const fn articles(&self) -> &ArticleClient {
        &self.articles
    }

    /// A fresh, signed-out dashboard with its own session.
    #[must_use]
    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(self.tokens.clone(), self.articles.clone())
    }
}
