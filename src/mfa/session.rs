//! MFA session expiry, persisted as an RFC 3339 string.

use super::store::{KeyValueStore, MemoryStore};
use crate::error::StorageError;
use crate::shared::serde_util::parse_timestamp;
use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::Arc;

/// Storage key of the expiry timestamp.
pub const MFA_SESSION_STORAGE_KEY: &str = "mfaSessionExpiresAt";

/// Reads and writes the MFA session expiry.
///
/// The session is valid while the stored expiry is strictly in the future.
/// A missing or unreadable value means no valid session.
#[derive(Clone)]
pub struct MfaSession {
    store: Arc<dyn KeyValueStore>,
}

impl Default for MfaSession {
    fn default() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }
}

impl std::fmt::Debug for MfaSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MfaSession").finish_non_exhaustive()
    }
}

impl MfaSession {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The raw stored value, if any.
    pub fn stored_expiry_raw(&self) -> Result<Option<String>, StorageError> {
        self.store.get(MFA_SESSION_STORAGE_KEY)
    }

    /// The stored expiry, if present and parseable.
    pub fn stored_expiry(&self) -> Option<DateTime<Utc>> {
        match self.stored_expiry_raw() {
            Ok(raw) => raw.as_deref().and_then(parse_timestamp),
            Err(e) => {
                tracing::warn!("Failed to read MFA session expiry: {}", e);
                None
            }
        }
    }

    /// Overwrite the stored expiry unconditionally.
    pub fn store_expiry(&self, expires_at: DateTime<Utc>) -> Result<(), StorageError> {
        let value = expires_at.to_rfc3339_opts(SecondsFormat::Millis, true);
        self.store.set(MFA_SESSION_STORAGE_KEY, &value)?;
        tracing::debug!(expires_at = %value, "Stored MFA session expiry");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(MFA_SESSION_STORAGE_KEY)
    }

    pub fn is_still_valid(&self) -> bool {
        self.is_still_valid_at(Utc::now())
    }

    pub fn is_still_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.stored_expiry().is_some_and(|expiry| expiry > now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn empty_store_is_invalid() {
        assert!(!MfaSession::default().is_still_valid());
    }

    #[test]
    fn future_expiry_is_valid_past_is_not() {
        let session = MfaSession::default();
        session.store_expiry(Utc::now() + Duration::minutes(5)).unwrap();
        assert!(session.is_still_valid());

        session.store_expiry(Utc::now() - Duration::seconds(1)).unwrap();
        assert!(!session.is_still_valid());
    }

    #[test]
    fn expiry_equal_to_now_is_invalid() {
        let session = MfaSession::default();
        let now = Utc::now();
        session.store_expiry(now).unwrap();
        let stored = session.stored_expiry().unwrap();
        assert!(!session.is_still_valid_at(stored));
        assert!(session.is_still_valid_at(stored - Duration::milliseconds(1)));
    }

    #[test]
    fn store_overwrites_previous_value() {
        let session = MfaSession::default();
        let later = Utc::now() + Duration::hours(1);
        session.store_expiry(later).unwrap();
        session.store_expiry(Utc::now() - Duration::hours(1)).unwrap();
        assert!(!session.is_still_valid());
    }

    #[test]
    fn garbage_value_is_invalid() {
        let store = Arc::new(MemoryStore::new());
        store.set(MFA_SESSION_STORAGE_KEY, "tomorrow").unwrap();
        let session = MfaSession::new(store);
        assert_eq!(session.stored_expiry_raw().unwrap().as_deref(), Some("tomorrow"));
        assert!(!session.is_still_valid());
    }

    #[test]
    fn accepts_server_timestamps_with_offset() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(MFA_SESSION_STORAGE_KEY, "2999-01-01T10:00:00.123456+00:00")
            .unwrap();
        assert!(MfaSession::new(store).is_still_valid());
    }

    #[test]
    fn clear_removes_session() {
        let session = MfaSession::default();
        session.store_expiry(Utc::now() + Duration::minutes(5)).unwrap();
        session.clear().unwrap();
        assert!(!session.is_still_valid());
    }
}
