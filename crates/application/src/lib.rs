//! Newsdesk Application - token lifecycle services
//!
//! This crate holds the ports to the identity provider and the article
//! service, and the services built on them: token acquisition, renewal,
//! the guard run before every API call, and the dashboard flow.

pub mod articles;
pub mod auth;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
mod test_support;

pub use articles::ArticleClient;
pub use auth::{
    SessionHandle, TokenAcquirer, TokenGuard, TokenManager, TokenRefresher, logout,
};
pub use use_cases::Dashboard;
