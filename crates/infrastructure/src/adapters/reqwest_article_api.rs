//! Article service client using reqwest.
//!
//! This adapter implements the `ArticleApi` port. Every request carries
//! `Authorization: Bearer {access_token}`.

use std::time::Duration;

use async_trait::async_trait;
use newsdesk_application::ports::{ArticleApi, ArticleApiError};
use newsdesk_domain::{Article, ArticleId, ArticleService, ArticleSummary};
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::http::{HttpSetupError, SendFailure, build_client, classify_send_error, timeout_ms};

/// Article service adapter.
pub struct ReqwestArticleApi {
    client: Client,
    service: ArticleService,
    timeout: Duration,
}

impl ReqwestArticleApi {
    /// Creates an adapter with its own client bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(service: ArticleService, timeout: Duration) -> Result<Self, HttpSetupError> {
        Ok(Self::with_client(build_client(timeout)?, service, timeout))
    }

    /// Creates an adapter around an existing client.
    #[must_use]
    pub const fn with_client(client: Client, service: ArticleService, timeout: Duration) -> Self {
        Self {
            client,
            service,
            timeout,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        access_token: &str,
    ) -> Result<T, ArticleApiError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(access_token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.map_error(&e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ArticleApiError::Status {
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(|e| {
            if e.is_decode() {
                ArticleApiError::Malformed(e.to_string())
            } else {
                self.map_error(&e)
            }
        })
    }

    fn map_error(&self, error: &reqwest::Error) -> ArticleApiError {
        match classify_send_error(error) {
            SendFailure::Timeout => ArticleApiError::Timeout {
                timeout_ms: timeout_ms(self.timeout),
            },
            SendFailure::Transport(message) => ArticleApiError::Transport(message),
        }
    }
}

#[async_trait]
impl ArticleApi for ReqwestArticleApi {
    async fn list_titles(
        &self,
        access_token: &str,
    ) -> Result<Vec<ArticleSummary>, ArticleApiError> {
        self.get_json(self.service.titles_url(), access_token).await
    }

    async fn fetch_article(
        &self,
        access_token: &str,
        id: ArticleId,
    ) -> Result<Article, ArticleApiError> {
        self.get_json(self.service.article_url(id), access_token)
            .await
    }
}
