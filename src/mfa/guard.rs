//! Single-slot guard for actions that need a fresh MFA session.

use super::session::MfaSession;
use crate::error::StorageError;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Mutex, MutexGuard};

/// A deferred async action, run at most once.
pub type PendingAction<T> = Box<dyn FnOnce() -> Pin<Box<dyn Future<Output = T> + Send>> + Send>;

/// Box an async closure as a [`PendingAction`].
pub fn pending<T, F, Fut>(action: F) -> PendingAction<T>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
{
    Box::new(move || Box::pin(action()))
}

/// Result of submitting an action to the guard.
#[derive(Debug)]
pub enum GuardOutcome<A> {
    /// The session is valid; the caller runs the action (or already got its
    /// result) now.
    Ready(A),
    /// No valid session. The action waits in the slot until an OTP is verified.
    Deferred,
}

impl<A> GuardOutcome<A> {
    pub fn is_deferred(&self) -> bool {
        matches!(self, GuardOutcome::Deferred)
    }

    pub fn ready(self) -> Option<A> {
        match self {
            GuardOutcome::Ready(a) => Some(a),
            GuardOutcome::Deferred => None,
        }
    }

    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> GuardOutcome<B> {
        match self {
            GuardOutcome::Ready(a) => GuardOutcome::Ready(f(a)),
            GuardOutcome::Deferred => GuardOutcome::Deferred,
        }
    }
}

/// Holds at most one pending action.
///
/// Submitting a new action while one is pending replaces it. Completing a
/// verification hands the pending action out exactly once; dismissing drops it.
pub struct OtpGuard<A> {
    slot: Mutex<Option<A>>,
}

impl<A> Default for OtpGuard<A> {
    fn default() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }
}

impl<A> std::fmt::Debug for OtpGuard<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtpGuard")
            .field("has_pending", &self.has_pending())
            .finish()
    }
}

impl<A> OtpGuard<A> {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the slot leaves a consistent Option behind.
    fn slot(&self) -> MutexGuard<'_, Option<A>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run now if the session is valid, otherwise park the action.
    pub fn submit(&self, session: &MfaSession, action: A) -> GuardOutcome<A> {
        let mut slot = self.slot();
        if session.is_still_valid() {
            if slot.take().is_some() {
                tracing::debug!("Discarded stale pending action");
            }
            GuardOutcome::Ready(action)
        } else {
            if slot.replace(action).is_some() {
                tracing::debug!("Replaced pending action");
            }
            tracing::debug!("MFA session invalid, OTP verification required");
            GuardOutcome::Deferred
        }
    }

    /// Record a successful verification and take the pending action.
    ///
    /// The expiry is stored first; if storing fails the action stays parked.
    pub fn complete(
        &self,
        session: &MfaSession,
        expires_at: DateTime<Utc>,
    ) -> Result<Option<A>, StorageError> {
        session.store_expiry(expires_at)?;
        Ok(self.slot().take())
    }

    /// Drop the pending action without running it.
    pub fn dismiss(&self) {
        if self.slot().take().is_some() {
            tracing::debug!("Dismissed pending action");
        }
    }

    pub fn has_pending(&self) -> bool {
        self.slot().is_some()
    }
}

impl<T: Send + 'static> OtpGuard<PendingAction<T>> {
    /// Submit and, if the session is valid, await the action.
    pub async fn execute(&self, session: &MfaSession, action: PendingAction<T>) -> GuardOutcome<T> {
        match self.submit(session, action) {
            GuardOutcome::Ready(action) => GuardOutcome::Ready(action().await),
            GuardOutcome::Deferred => GuardOutcome::Deferred,
        }
    }

    /// Complete a verification and await the pending action, if any.
    pub async fn resume(
        &self,
        session: &MfaSession,
        expires_at: DateTime<Utc>,
    ) -> Result<Option<T>, StorageError> {
        match self.complete(session, expires_at)? {
            Some(action) => Ok(Some(action().await)),
            None => Ok(None),
        }
    }
}
