//! Shared, lock-guarded ownership of one session.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use newsdesk_domain::{AuthError, Session};
use tokio::sync::{Mutex, MutexGuard};

/// A session plus the outcome of the last failed refresh attempt.
#[derive(Debug, Default)]
pub(crate) struct SessionSlot {
    pub(crate) session: Session,
    last_refresh_failure: Option<AuthError>,
}

impl SessionSlot {
    /// Forgets the last refresh failure.
    pub(crate) fn clear_refresh_failure(&mut self) {
        self.last_refresh_failure = None;
    }
}

/// Exclusive-access handle to a [`Session`].
///
/// Clones share the same session. Holding the lock across the whole
/// check-then-refresh sequence is what keeps concurrent callers from sending
/// duplicate refresh grants. Callers that queued behind a refresh attempt
/// that failed get that attempt's error instead of trying again.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    slot: Arc<Mutex<SessionSlot>>,
    refresh_failures: Arc<AtomicU64>,
}

impl SessionHandle {
    /// Creates a handle around an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the current session.
    pub async fn snapshot(&self) -> Session {
        self.slot.lock().await.session.clone()
    }

    /// Number of refresh attempts that failed without ending the session.
    pub(crate) fn refresh_failures(&self) -> u64 {
        self.refresh_failures.load(Ordering::SeqCst)
    }

    /// Waits for exclusive access to the session and its failure record.
    pub(crate) async fn lock_slot(&self) -> MutexGuard<'_, SessionSlot> {
        self.slot.lock().await
    }

    /// Records a failed refresh. Must be called with `slot` locked.
    pub(crate) fn record_refresh_failure(&self, slot: &mut SessionSlot, error: &AuthError) {
        slot.last_refresh_failure = Some(error.clone());
        self.refresh_failures.fetch_add(1, Ordering::SeqCst);
    }

    /// The failure recorded after `observed`, if one is still standing.
    pub(crate) fn refresh_failure_since(
        &self,
        slot: &SessionSlot,
        observed: u64,
    ) -> Option<AuthError> {
        if self.refresh_failures() == observed {
            return None;
        }
        slot.last_refresh_failure.clone()
    }
}
