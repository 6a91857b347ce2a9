//! MFA/OTP session guard.
//!
//! A successful OTP verification opens a time-boxed MFA session whose expiry
//! is persisted in a [`KeyValueStore`]. Sensitive actions go through an
//! [`OtpGuard`]: they run immediately while the session is valid and wait in
//! a single slot otherwise.

pub mod guard;
pub mod session;
pub mod store;

pub use guard::{pending, GuardOutcome, OtpGuard, PendingAction};
pub use session::{MfaSession, MFA_SESSION_STORAGE_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore};
