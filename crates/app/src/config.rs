//! Layered configuration.
//!
//! Values come from built-in defaults, then an optional `newsdesk.toml` in
//! the working directory, then `NEWSDESK_*` environment variables using `__`
//! between section and key (`NEWSDESK_IDENTITY__BASE_URL`).

use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use newsdesk_domain::{ArticleService, DomainResult, IdentityProvider, RefreshPolicy};
use newsdesk_infrastructure::DEFAULT_TIMEOUT;
use serde::Deserialize;

/// Base name of the optional configuration file.
pub const CONFIG_FILE: &str = "newsdesk";

/// Identity provider location.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Keycloak base URL, e.g. `http://keycloak:8080`.
    pub base_url: String,
    /// Realm holding the client.
    pub realm: String,
    /// Public client used for both grants.
    pub client_id: String,
}

/// Article service location.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticlesConfig {
    /// Article service base URL, e.g. `http://news-api:8081`.
    pub base_url: String,
}

/// Outbound HTTP settings.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout for both remote services.
    pub timeout_secs: u64,
}

/// Token renewal settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Whether the password is kept for re-login.
    pub refresh_policy: RefreshPolicy,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human readable output.
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset: trace, debug, info, warn, error.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

/// Complete application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// `[identity]`
    pub identity: IdentityConfig,
    /// `[articles]`
    pub articles: ArticlesConfig,
    /// `[http]`
    pub http: HttpConfig,
    /// `[auth]`
    pub auth: AuthConfig,
    /// `[logging]`
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads defaults, `newsdesk.toml` if present, and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or the result is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_builder(
            Self::defaults()?
                .add_source(File::with_name(CONFIG_FILE).required(false))
                .add_source(
                    Environment::with_prefix("NEWSDESK")
                        .prefix_separator("_")
                        .separator("__")
                        .try_parsing(true),
                ),
        )
    }

    /// Loads defaults overlaid with a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be parsed or the result is invalid.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let source = File::from_str(toml, FileFormat::Toml);
        Self::from_builder(Self::defaults()?.add_source(source))
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("identity.base_url", "http://keycloak:8080")?
            .set_default("identity.realm", "news_realm")?
            .set_default("identity.client_id", "news_app_client")?
            .set_default("articles.base_url", "http://news-api:8081")?
            .set_default("http.timeout_secs", DEFAULT_TIMEOUT.as_secs())?
            .set_default("auth.refresh_policy", "password_fallback")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "http.timeout_secs must be greater than 0".to_string(),
            ));
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                )));
            }
        }

        self.identity_provider()
            .map_err(|e| ConfigError::Message(format!("identity: {e}")))?;
        self.article_service()
            .map_err(|e| ConfigError::Message(format!("articles: {e}")))?;
        Ok(())
    }

    /// Token endpoint addressing for the configured realm.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL, realm or client id is invalid.
    pub fn identity_provider(&self) -> DomainResult<IdentityProvider> {
        IdentityProvider::new(
            &self.identity.base_url,
            &self.identity.realm,
            &self.identity.client_id,
        )
    }

    /// Article service addressing.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn article_service(&self) -> DomainResult<ArticleService> {
        ArticleService::new(&self.articles.base_url)
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }
}
