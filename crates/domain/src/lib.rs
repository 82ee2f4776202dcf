//! Newsdesk Domain - Core types
//!
//! This crate defines the session model, token types, error taxonomy and
//! endpoint addressing for the Newsdesk token lifecycle manager.
//! All types here are pure Rust with no I/O dependencies.

pub mod article;
pub mod auth;
pub mod endpoints;
pub mod error;
pub mod state;

pub use article::{Article, ArticleId, ArticleSummary};
pub use auth::{
    AuthError, Credentials, RefreshPolicy, Session, TokenResponse, TokenSet, token_preview,
};
pub use endpoints::{ArticleService, IdentityProvider};
pub use error::{DomainError, DomainResult};
pub use state::DashboardState;
