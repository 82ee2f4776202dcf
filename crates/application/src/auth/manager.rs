//! Token lifecycle facade.
//!
//! [`TokenManager`] ties the acquirer, the refresher and the guard to a
//! [`SessionHandle`]: login commits an acquired token, `authorize` runs the
//! guard under the session lock and hands out the bearer token, logout
//! clears everything.

use std::sync::Arc;

use newsdesk_domain::{AuthError, Credentials, RefreshPolicy, Session};
use tracing::{debug, info};

use super::acquirer::TokenAcquirer;
use super::guard::TokenGuard;
use super::refresher::TokenRefresher;
use super::session_handle::SessionHandle;
use crate::ports::{Clock, TokenEndpoint};

/// Entry point for everything token related.
#[derive(Clone)]
pub struct TokenManager {
    acquirer: TokenAcquirer,
    guard: TokenGuard,
    policy: RefreshPolicy,
}

impl TokenManager {
    /// Wires the lifecycle components around one token endpoint.
    #[must_use]
    pub fn new(
        endpoint: Arc<dyn TokenEndpoint>,
        clock: Arc<dyn Clock>,
        policy: RefreshPolicy,
    ) -> Self {
        let refresher = TokenRefresher::new(Arc::clone(&endpoint), policy);
        Self {
            acquirer: TokenAcquirer::new(endpoint),
            guard: TokenGuard::new(refresher, clock),
            policy,
        }
    }

    /// Acquires a token for `credentials` and commits it into the session.
    ///
    /// On failure the session is left as it was.
    ///
    /// # Errors
    /// [`AuthError::InvalidCredentials`] or [`AuthError::ProviderUnavailable`].
    pub async fn login(
        &self,
        handle: &SessionHandle,
        credentials: Credentials,
    ) -> Result<(), AuthError> {
        let mut slot = handle.lock_slot().await;
        let response = self.acquirer.acquire(&credentials).await?;
        let retained = self.policy.retains_password().then_some(credentials);
        slot.session.commit_login(retained, response);
        slot.clear_refresh_failure();
        Ok(())
    }

    /// Runs the guard under the session lock and returns the bearer token.
    ///
    /// Concurrent callers on the same handle queue on the lock, so an
    /// expired token is refreshed once and every waiter gets the new one.
    /// When that refresh fails on the provider side, waiters that queued
    /// behind it get the same error without sending another grant.
    ///
    /// # Errors
    /// See [`TokenGuard::ensure_valid`].
    pub async fn authorize(&self, handle: &SessionHandle) -> Result<String, AuthError> {
        let observed = handle.refresh_failures();
        let mut slot = handle.lock_slot().await;
        if let Some(error) = handle.refresh_failure_since(&slot, observed) {
            debug!(error = %error, "refresh failed while waiting for the session");
            return Err(error);
        }

        match self.guard.ensure_valid(&mut slot.session).await {
            Ok(()) => slot.clear_refresh_failure(),
            Err(error @ AuthError::ProviderUnavailable { .. }) => {
                handle.record_refresh_failure(&mut slot, &error);
                return Err(error);
            }
            Err(error) => return Err(error),
        }

        slot.session
            .access_token()
            .map(str::to_owned)
            .ok_or(AuthError::NotAuthenticated)
    }

    /// Clears the session. Idempotent.
    pub async fn logout(&self, handle: &SessionHandle) {
        let mut slot = handle.lock_slot().await;
        if let Some(username) = slot.session.username() {
            info!(username, "logged out");
        }
        logout(&mut slot.session);
        slot.clear_refresh_failure();
    }
}

/// Clears every field of `session` unconditionally.
pub fn logout(session: &mut Session) {
    session.clear();
}
