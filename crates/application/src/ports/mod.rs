//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod article_api;
mod clock;
mod token_endpoint;

pub use article_api::{ArticleApi, ArticleApiError};
pub use clock::Clock;
pub use token_endpoint::{TokenEndpoint, TokenEndpointError};
