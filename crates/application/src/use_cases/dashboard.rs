//! Dashboard flow use case
//!
//! Drives login, browsing and logout for one user and returns the next
//! [`DashboardState`] after every action.

use newsdesk_domain::{ArticleId, AuthError, Credentials, DashboardState};
use tracing::debug;

use crate::articles::ArticleClient;
use crate::auth::{SessionHandle, TokenManager};

const MISSING_INPUT: &str = "Enter your username and password.";

/// One user's dashboard.
pub struct Dashboard {
    tokens: TokenManager,
    articles: ArticleClient,
    session: SessionHandle,
    state: DashboardState,
}

impl Dashboard {
    /// Creates a signed-out dashboard with a fresh session.
    #[must_use]
    pub fn new(tokens: TokenManager, articles: ArticleClient) -> Self {
        Self {
            tokens,
            articles,
            session: SessionHandle::new(),
            state: DashboardState::signed_out(),
        }
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> &DashboardState {
        &self.state
    }

    /// The session driven by this dashboard.
    #[must_use]
    pub const fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// Logs in and loads the title list.
    ///
    /// Empty input is rejected here, before any network call.
    pub async fn login(&mut self, username: &str, password: &str) -> DashboardState {
        let credentials = match Credentials::new(username, password) {
            Ok(credentials) => credentials,
            Err(error) => {
                debug!(%error, "login form incomplete");
                return self.transition(DashboardState::signed_out_with(MISSING_INPUT));
            }
        };
        let username = credentials.username().to_string();

        if let Err(error) = self.tokens.login(&self.session, credentials).await {
            return self.transition(DashboardState::signed_out_with(error.user_message()));
        }

        self.state = DashboardState::Browsing {
            username,
            titles: Vec::new(),
            selected: None,
            notice: None,
        };
        self.reload().await
    }

    /// Re-fetches the title list.
    ///
    /// A signed-out dashboard answers with the login form without fetching.
    pub async fn reload(&mut self) -> DashboardState {
        if !self.state.is_signed_in() {
            return self.fail(&AuthError::NotAuthenticated);
        }
        match self.articles.list_titles(&self.session).await {
            Ok(fresh) => {
                if let DashboardState::Browsing { titles, notice, .. } = &mut self.state {
                    *titles = fresh;
                    *notice = None;
                }
                self.state.clone()
            }
            Err(error) => self.fail(&error),
        }
    }

    /// Opens an article.
    pub async fn open_article(&mut self, id: ArticleId) -> DashboardState {
        if !self.state.is_signed_in() {
            return self.fail(&AuthError::NotAuthenticated);
        }
        match self.articles.fetch_article(&self.session, id).await {
            Ok(article) => {
                if let DashboardState::Browsing {
                    selected, notice, ..
                } = &mut self.state
                {
                    *selected = Some(article);
                    *notice = None;
                }
                self.state.clone()
            }
            Err(error) => self.fail(&error),
        }
    }

    /// Logs out.
    pub async fn logout(&mut self) -> DashboardState {
        self.tokens.logout(&self.session).await;
        self.transition(DashboardState::signed_out())
    }

    fn fail(&mut self, error: &AuthError) -> DashboardState {
        let next = if error.requires_login() || !self.state.is_signed_in() {
            DashboardState::signed_out_with(error.user_message())
        } else {
            self.state.clone().with_notice(error.user_message())
        };
        self.transition(next)
    }

    fn transition(&mut self, next: DashboardState) -> DashboardState {
        self.state = next;
        self.state.clone()
    }
}
