//! High-level client: `WalletClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the shared session, cache and OTP guard
//! state, and the accessor methods.

use crate::auth::client::Auth;
use crate::auth::oidc::OidcClient;
use crate::auth::session::OidcSession;
use crate::cache::QueryCache;
use crate::config::{AppConfig, OidcSettings};
use crate::domain::account::client::Accounts;
use crate::domain::market::client::Market;
use crate::domain::otp::client::Otp;
use crate::domain::payout::client::Payouts;
use crate::domain::payout::{Withdrawal, WithdrawalMethod};
use crate::domain::position::client::Positions;
use crate::domain::profile::client::Profile;
use crate::domain::trade::client::Trades;
use crate::domain::transaction::client::Transactions;
use crate::error::SdkError;
use crate::http::{AccessTokenSource, RetryPolicy, StaticToken, WalletHttp};
use crate::mfa::{GuardOutcome, KeyValueStore, MfaSession, OtpGuard, PendingAction};

use std::sync::Arc;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::auth::client::Auth as AuthClient;
pub use crate::domain::account::client::Accounts as AccountsClient;
pub use crate::domain::market::client::Market as MarketClient;
pub use crate::domain::otp::client::Otp as OtpClient;
pub use crate::domain::otp::client::OtpVerified;
pub use crate::domain::payout::client::Payouts as PayoutsClient;
pub use crate::domain::position::client::Positions as PositionsClient;
pub use crate::domain::profile::client::Profile as ProfileClient;
pub use crate::domain::trade::client::Trades as TradesClient;
pub use crate::domain::transaction::client::Transactions as TransactionsClient;

/// Result of an action that needed a fresh MFA session.
#[derive(Debug, Clone, PartialEq)]
pub enum ProtectedOutcome {
    Withdrawal(Withdrawal),
    WithdrawalMethod(WithdrawalMethod),
    ProfileUpdated,
    PasswordChanged,
}

impl ProtectedOutcome {
    pub fn into_withdrawal(self) -> Option<Withdrawal> {
        match self {
            ProtectedOutcome::Withdrawal(w) => Some(w),
            _ => None,
        }
    }

    pub fn into_withdrawal_method(self) -> Option<WithdrawalMethod> {
        match self {
            ProtectedOutcome::WithdrawalMethod(m) => Some(m),
            _ => None,
        }
    }

    pub fn into_profile_updated(self) -> Option<()> {
        matches!(self, ProtectedOutcome::ProfileUpdated).then_some(())
    }

    pub fn into_password_changed(self) -> Option<()> {
        matches!(self, ProtectedOutcome::PasswordChanged).then_some(())
    }
}

/// An action parked by the OTP guard.
pub type ProtectedAction = PendingAction<Result<ProtectedOutcome, SdkError>>;

/// The primary entry point for the wallet SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.accounts()`, `client.payouts()`, etc. Cloning is cheap and clones
/// share the session, cache and pending OTP action.
#[derive(Clone)]
pub struct WalletClient {
    pub(crate) http: WalletHttp,
    pub(crate) config: Arc<AppConfig>,
    pub(crate) session: Arc<OidcSession>,
    pub(crate) mfa: MfaSession,
    pub(crate) otp_guard: Arc<OtpGuard<ProtectedAction>>,
    pub(crate) cache: QueryCache,
    /// Retry policy for GET requests.
    pub(crate) read_retry: RetryPolicy,
}

impl std::fmt::Debug for WalletClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletClient")
            .field("base_url", &self.http.base_url().as_str())
            .field("mfa", &self.mfa)
            .field("otp_guard", &self.otp_guard)
            .finish_non_exhaustive()
    }
}

impl WalletClient {
    pub fn builder() -> WalletClientBuilder {
        WalletClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn accounts(&self) -> Accounts<'_> {
        Accounts { client: self }
    }

    pub fn transactions(&self) -> Transactions<'_> {
        Transactions { client: self }
    }

    pub fn positions(&self) -> Positions<'_> {
        Positions { client: self }
    }

    pub fn market(&self) -> Market<'_> {
        Market { client: self }
    }

    pub fn trades(&self) -> Trades<'_> {
        Trades { client: self }
    }

    pub fn payouts(&self) -> Payouts<'_> {
        Payouts { client: self }
    }

    pub fn otp(&self) -> Otp<'_> {
        Otp { client: self }
    }

    pub fn profile(&self) -> Profile<'_> {
        Profile { client: self }
    }

    pub fn auth(&self) -> Auth<'_> {
        Auth { client: self }
    }

    // ── Shared state ─────────────────────────────────────────────────────

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn mfa(&self) -> &MfaSession {
        &self.mfa
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    /// Run `action` through the OTP guard and pull the expected result out.
    ///
    /// The stored expiry is never cleared here: a 403 from the server is
    /// returned as is, and the next verification overwrites the expiry.
    pub(crate) async fn run_protected<T>(
        &self,
        action: ProtectedAction,
        extract: impl FnOnce(ProtectedOutcome) -> Option<T>,
    ) -> Result<GuardOutcome<T>, SdkError> {
        match self.otp_guard.execute(&self.mfa, action).await {
            GuardOutcome::Deferred => Ok(GuardOutcome::Deferred),
            GuardOutcome::Ready(Ok(outcome)) => extract(outcome)
                .map(GuardOutcome::Ready)
                .ok_or_else(|| SdkError::Other("Unexpected result from protected action".into())),
            GuardOutcome::Ready(Err(e)) => {
                if matches!(&e, SdkError::Http(h) if h.is_mfa_required()) {
                    tracing::warn!("Server rejected the MFA session: {}", e);
                }
                Err(e)
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct WalletClientBuilder {
    config: Option<AppConfig>,
    base_url: Option<String>,
    oidc: Option<OidcSettings>,
    token_source: Option<Arc<dyn AccessTokenSource>>,
    storage: Option<Arc<dyn KeyValueStore>>,
    read_retry: RetryPolicy,
    cache_stale_time: Option<Duration>,
}

impl WalletClientBuilder {
    /// Start from a resolved configuration (defaults otherwise).
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    pub fn oidc(mut self, settings: OidcSettings) -> Self {
        self.oidc = Some(settings);
        self
    }

    /// Send a fixed bearer token instead of the OIDC session's.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.token_source = Some(Arc::new(StaticToken::new(token)));
        self
    }

    pub fn token_source(mut self, source: Arc<dyn AccessTokenSource>) -> Self {
        self.token_source = Some(source);
        self
    }

    /// Where the MFA session expiry is persisted. In memory by default.
    pub fn storage(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.storage = Some(store);
        self
    }

    /// Retry policy for GET requests. Mutations are never retried.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.read_retry = policy;
        self
    }

    /// Override every cache key's stale time. Zero disables caching.
    pub fn cache_stale_time(mut self, stale_time: Duration) -> Self {
        self.cache_stale_time = Some(stale_time);
        self
    }

    pub fn build(self) -> Result<WalletClient, SdkError> {
        let mut config = self.config.unwrap_or_default();
        if let Some(base_url) = self.base_url {
            config.api_base_url = base_url;
        }
        if let Some(oidc) = self.oidc {
            config.oidc = oidc;
        }

        let session = Arc::new(OidcSession::new(OidcClient::new(config.oidc.clone())?));
        let tokens = match self.token_source {
            Some(source) => source,
            None => Arc::clone(&session) as Arc<dyn AccessTokenSource>,
        };
        let http = WalletHttp::new(&config.api_base_url, tokens)?;

        let mfa = match self.storage {
            Some(store) => MfaSession::new(store),
            None => MfaSession::default(),
        };
        let cache = match self.cache_stale_time {
            Some(stale_time) => QueryCache::with_stale_time(stale_time),
            None => QueryCache::new(),
        };

        tracing::debug!(
            api = %config.api_base_url,
            issuer = %config.oidc.issuer,
            "Wallet client ready"
        );

        Ok(WalletClient {
            http,
            config: Arc::new(config),
            session,
            mfa,
            otp_guard: Arc::new(OtpGuard::new()),
            cache,
            read_retry: self.read_retry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_applies_overrides() {
        let client = WalletClient::builder()
            .base_url("http://127.0.0.1:9000")
            .access_token("t")
            .build()
            .unwrap();
        assert_eq!(client.config().api_base_url, "http://127.0.0.1:9000");
        assert_eq!(client.http.base_url().as_str(), "http://127.0.0.1:9000/");
    }

    #[test]
    fn invalid_base_url_is_an_error() {
        let err = WalletClient::builder().base_url("not a url").build().unwrap_err();
        assert!(matches!(err, SdkError::Http(_)));
    }

    #[test]
    fn outcome_extraction_checks_the_variant() {
        assert_eq!(ProtectedOutcome::PasswordChanged.into_password_changed(), Some(()));
        assert_eq!(ProtectedOutcome::PasswordChanged.into_profile_updated(), None);
        assert!(ProtectedOutcome::ProfileUpdated.into_withdrawal().is_none());
    }
}
