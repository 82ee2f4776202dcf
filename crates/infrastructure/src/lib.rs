//! Newsdesk Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod auth;
pub mod http;

pub use adapters::{ReqwestArticleApi, SystemClock};
pub use auth::KeycloakTokenEndpoint;
pub use http::{DEFAULT_TIMEOUT, HttpSetupError, build_client};
