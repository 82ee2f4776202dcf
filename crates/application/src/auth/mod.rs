//! Token lifecycle management.
//!
//! This module provides:
//! - Initial token acquisition (password grant)
//! - Renewal through refresh grants, with a password fallback
//! - The guard run before every downstream API call
//! - A lock-guarded session handle and the facade tying them together

mod acquirer;
mod guard;
mod manager;
mod refresher;
mod session_handle;

pub use acquirer::TokenAcquirer;
pub use guard::TokenGuard;
pub use manager::{TokenManager, logout};
pub use refresher::TokenRefresher;
pub use session_handle::SessionHandle;
