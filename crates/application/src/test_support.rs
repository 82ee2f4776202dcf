//! Hand-written port doubles shared by the unit tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use newsdesk_domain::{Article, ArticleId, ArticleSummary, Credentials, TokenResponse};

use crate::ports::{ArticleApi, ArticleApiError, Clock, TokenEndpoint, TokenEndpointError};

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

/// A clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn at(now: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(now),
        })
    }

    pub fn advance(&self, secs: i64) {
        let mut now = self.now.lock().expect("Lock poisoned");
        *now += chrono::Duration::seconds(secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("Lock poisoned")
    }
}

/// One scripted answer of the token endpoint.
#[derive(Debug, Clone)]
pub enum Reply {
    Token {
        access: &'static str,
        refresh: Option<&'static str>,
        expires_in: u64,
    },
    Reject(u16),
    Timeout,
}

impl Reply {
    pub const fn token(
        access: &'static str,
        refresh: Option<&'static str>,
        expires_in: u64,
    ) -> Self {
        Self::Token {
            access,
            refresh,
            expires_in,
        }
    }
}

/// Token endpoint double answering from per-grant queues.
pub struct ScriptedTokenEndpoint {
    clock: Arc<ManualClock>,
    password_replies: Mutex<VecDeque<Reply>>,
    refresh_replies: Mutex<VecDeque<Reply>>,
    password_calls: AtomicUsize,
    refresh_calls: AtomicUsize,
    submitted: Mutex<Vec<String>>,
    delay: Duration,
}

impl ScriptedTokenEndpoint {
    pub fn new(clock: Arc<ManualClock>) -> Self {
        Self {
            clock,
            password_replies: Mutex::new(VecDeque::new()),
            refresh_replies: Mutex::new(VecDeque::new()),
            password_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
            submitted: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn on_password(self, reply: Reply) -> Self {
        self.password_replies.lock().unwrap().push_back(reply);
        self
    }

    #[must_use]
    pub fn on_refresh(self, reply: Reply) -> Self {
        self.refresh_replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn password_calls(&self) -> usize {
        self.password_calls.load(Ordering::SeqCst)
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.password_calls() + self.refresh_calls()
    }

    /// Usernames and refresh tokens in the order they were submitted.
    pub fn submitted(&self) -> Vec<String> {
        self.submitted.lock().unwrap().clone()
    }

    async fn answer(
        &self,
        queue: &Mutex<VecDeque<Reply>>,
    ) -> Result<TokenResponse, TokenEndpointError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let reply = queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Reply::Reject(400));
        match reply {
            Reply::Token {
                access,
                refresh,
                expires_in,
            } => TokenResponse::received(
                access,
                refresh.map(String::from),
                expires_in,
                self.clock.now(),
            )
            .map_err(|e| TokenEndpointError::Malformed(e.to_string())),
            Reply::Reject(status) => Err(TokenEndpointError::Rejected {
                status,
                detail: Some("invalid_grant".to_string()),
            }),
            Reply::Timeout => Err(TokenEndpointError::Timeout { timeout_ms: 10_000 }),
        }
    }
}

#[async_trait]
impl TokenEndpoint for ScriptedTokenEndpoint {
    async fn password_grant(
        &self,
        credentials: &Credentials,
    ) -> Result<TokenResponse, TokenEndpointError> {
        self.password_calls.fetch_add(1, Ordering::SeqCst);
        self.submitted
            .lock()
            .unwrap()
            .push(credentials.username().to_string());
        self.answer(&self.password_replies).await
    }

    async fn refresh_grant(
        &self,
        refresh_token: &str,
    ) -> Result<TokenResponse, TokenEndpointError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.submitted
            .lock()
            .unwrap()
            .push(refresh_token.to_string());
        self.answer(&self.refresh_replies).await
    }
}

/// Article service double with a fixed catalog.
pub struct StaticArticleApi {
    articles: Vec<Article>,
    failure: Mutex<Option<ArticleApiError>>,
    bearer_tokens: Mutex<Vec<String>>,
}

impl StaticArticleApi {
    pub fn new() -> Self {
        Self {
            articles: vec![
                Article {
                    id: 1,
                    title: "First".into(),
                    content: "Alpha".into(),
                },
                Article {
                    id: 2,
                    title: "Second".into(),
                    content: "Beta".into(),
                },
            ],
            failure: Mutex::new(None),
            bearer_tokens: Mutex::new(Vec::new()),
        }
    }

    /// Makes every following call fail with `error`.
    pub fn fail_with(&self, error: ArticleApiError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    /// Bearer tokens presented so far.
    pub fn bearer_tokens(&self) -> Vec<String> {
        self.bearer_tokens.lock().unwrap().clone()
    }

    fn record(&self, access_token: &str) -> Result<(), ArticleApiError> {
        self.bearer_tokens
            .lock()
            .unwrap()
            .push(access_token.to_string());
        self.failure.lock().unwrap().clone().map_or(Ok(()), Err)
    }
}

#[async_trait]
impl ArticleApi for StaticArticleApi {
    async fn list_titles(
        &self,
        access_token: &str,
    ) -> Result<Vec<ArticleSummary>, ArticleApiError> {
        self.record(access_token)?;
        Ok(self
            .articles
            .iter()
            .map(|a| ArticleSummary {
                id: a.id,
                title: a.title.clone(),
            })
            .collect())
    }

    async fn fetch_article(
        &self,
        access_token: &str,
        id: ArticleId,
    ) -> Result<Article, ArticleApiError> {
        self.record(access_token)?;
        self.articles
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(ArticleApiError::Status { status: 404 })
    }
}
