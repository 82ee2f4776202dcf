//! Article service port.

use async_trait::async_trait;
use newsdesk_domain::{Article, ArticleId, ArticleSummary};
use thiserror::Error;

/// What went wrong talking to the article service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArticleApiError {
    /// The service answered with a non-200 status.
    #[error("article service returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// No answer within the configured timeout.
    #[error("article service timed out after {timeout_ms} ms")]
    Timeout {
        /// The timeout that elapsed.
        timeout_ms: u64,
    },

    /// Connection-level failure.
    #[error("cannot reach article service: {0}")]
    Transport(String),

    /// The body could not be decoded.
    #[error("malformed article response: {0}")]
    Malformed(String),
}

/// Port for the article service. Every call carries a bearer token.
#[async_trait]
pub trait ArticleApi: Send + Sync {
    /// `GET /api/articles/titles`
    async fn list_titles(&self, access_token: &str)
    -> Result<Vec<ArticleSummary>, ArticleApiError>;

    /// `GET /api/articles/{id}`
    async fn fetch_article(
        &self,
        access_token: &str,
        id: ArticleId,
    ) -> Result<Article, ArticleApiError>;
}
