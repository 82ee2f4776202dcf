//! Authentication domain types

mod error;
mod policy;
mod session;
mod types;

pub use error::AuthError;
pub use policy::RefreshPolicy;
pub use session::Session;
pub use types::{Credentials, TokenResponse, TokenSet, token_preview};
