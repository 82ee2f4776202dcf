//! Dashboard state types for UI binding.
//!
//! Every dashboard action returns the next [`DashboardState`]; the front end
//! re-renders from it instead of re-running the whole page.

use serde::{Deserialize, Serialize};

use crate::article::{Article, ArticleSummary};

/// What the front end should currently show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardState {
    /// Login form, optionally with an inline message.
    SignedOut {
        /// Message to show next to the login form.
        notice: Option<String>,
    },

    /// Logged in and browsing the catalog.
    Browsing {
        /// The logged-in user.
        username: String,
        /// Titles in catalog order.
        titles: Vec<ArticleSummary>,
        /// The article currently open, if any.
        selected: Option<Article>,
        /// A retryable error from the last action.
        notice: Option<String>,
    },
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::signed_out()
    }
}

impl DashboardState {
    /// Login form without a message.
    #[must_use]
    pub const fn signed_out() -> Self {
        Self::SignedOut { notice: None }
    }

    /// Login form with a message.
    #[must_use]
    pub fn signed_out_with(notice: impl Into<String>) -> Self {
        Self::SignedOut {
            notice: Some(notice.into()),
        }
    }

    /// Returns true while a user is logged in.
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        matches!(self, Self::Browsing { .. })
    }

    /// The title list, empty when signed out.
    #[must_use]
    pub fn titles(&self) -> &[ArticleSummary] {
        match self {
            Self::Browsing { titles, .. } => titles,
            Self::SignedOut { .. } => &[],
        }
    }

    /// The open article.
    #[must_use]
    pub const fn selected(&self) -> Option<&Article> {
        match self {
            Self::Browsing { selected, .. } => selected.as_ref(),
            Self::SignedOut { .. } => None,
        }
    }

    /// The message attached to this state.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        match self {
            Self::SignedOut { notice } | Self::Browsing { notice, .. } => notice.as_deref(),
        }
    }

    /// Same state with `notice` replaced.
    #[must_use]
    pub fn with_notice(mut self, message: impl Into<String>) -> Self {
        match &mut self {
            Self::SignedOut { notice } | Self::Browsing { notice, .. } => {
                *notice = Some(message.into());
            }
        }
        self
    }
}
