//! Guarded access to the article service.

use std::sync::Arc;

use newsdesk_domain::{Article, ArticleId, ArticleSummary, AuthError};
use tracing::warn;

use crate::auth::{SessionHandle, TokenManager};
use crate::ports::{ArticleApi, ArticleApiError};

/// Article service client that authorizes every call first.
#[derive(Clone)]
pub struct ArticleClient {
    api: Arc<dyn ArticleApi>,
    tokens: TokenManager,
}

impl ArticleClient {
    /// Creates a client.
    #[must_use]
    pub fn new(api: Arc<dyn ArticleApi>, tokens: TokenManager) -> Self {
        Self { api, tokens }
    }

    /// Lists article titles in catalog order.
    ///
    /// # Errors
    /// Guard errors unchanged, or [`AuthError::ArticleFetchFailed`].
    pub async fn list_titles(
        &self,
        session: &SessionHandle,
    ) -> Result<Vec<ArticleSummary>, AuthError> {
        let access_token = self.tokens.authorize(session).await?;
        self.api
            .list_titles(&access_token)
            .await
            .map_err(|error| fetch_failed("list titles", &error))
    }

    /// Fetches one article.
    ///
    /// # Errors
    /// Guard errors unchanged, or [`AuthError::ArticleFetchFailed`].
    pub async fn fetch_article(
        &self,
        session: &SessionHandle,
        id: ArticleId,
    ) -> Result<Article, AuthError> {
        let access_token = self.tokens.authorize(session).await?;
        self.api
            .fetch_article(&access_token, id)
            .await
            .map_err(|error| fetch_failed("fetch article", &error))
    }
}

fn fetch_failed(operation: &str, error: &ArticleApiError) -> AuthError {
    warn!(operation, %error, "article service call failed");
    AuthError::ArticleFetchFailed {
        message: error.to_string(),
    }
}
