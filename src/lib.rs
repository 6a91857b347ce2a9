//! # Thesis Wallet SDK
//!
//! A Rust client for the Thesis Wallet REST API and its OpenID Connect
//! identity provider.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core**: Config, shared newtypes, domain view models, local validation (always available)
//! 2. **MFA**: Storage-backed OTP session expiry + single-slot guard for sensitive actions
//! 3. **HTTP API**: `WalletHttp` with bearer injection and error normalization
//! 4. **Auth**: OIDC authorization-code + PKCE, silent renew, sign-out
//! 5. **High-Level Client**: `WalletClient` with nested sub-clients and a query cache
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use thesis_wallet_sdk::prelude::*;
//!
//! let client = WalletClient::builder()
//!     .config(AppConfig::load()?)
//!     .build()?;
//!
//! let accounts = client.accounts().list().await?;
//! let summary = AccountSummary::from_accounts(&accounts);
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and lenient wire parsing.
pub mod shared;

/// Domain modules (vertical slices): view models, wire types, conversions, validation.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Default URLs and scopes.
pub mod network;

/// Environment-driven application configuration.
pub mod config;

// ── Layer 2: MFA ─────────────────────────────────────────────────────────────

/// MFA/OTP session expiry and the guard for sensitive actions.
pub mod mfa;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with bearer injection and retry policies.
#[cfg(feature = "http")]
pub mod http;

/// Query cache keys, stale times and invalidation rules.
#[cfg(feature = "http")]
pub mod cache;

// ── Layer 4: Auth ────────────────────────────────────────────────────────────

/// OIDC: token sets, PKCE, provider metadata, redirects, session.
pub mod auth;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `WalletClient`: the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{AccountId, ChallengeId, Direction, Side, WithdrawalMethodId};

    // Domain types
    pub use crate::domain::account::{Account, AccountSummary, TopUp};
    pub use crate::domain::market::{AssetDetail, MarketAsset, PricePoint};
    pub use crate::domain::otp::wire::OtpSendRequest;
    pub use crate::domain::otp::{OtpChallenge, OtpVerification};
    pub use crate::domain::payout::{
        Withdrawal, WithdrawalDraft, WithdrawalMethod, WithdrawalMethodDraft, WithdrawalPreview,
    };
    pub use crate::domain::position::{CryptoPosition, Portfolio};
    pub use crate::domain::profile::{PasswordChange, ProfileDraft, ProfileUpdate};
    pub use crate::domain::trade::{CryptoOrderResult, TradeDraft, TradeIntent};
    pub use crate::domain::transaction::{NewTransaction, Transaction, TransactionFilter};

    // Errors
    pub use crate::error::{AuthError, HttpError, SdkError, StorageError, ValidationError};

    // Config
    pub use crate::config::{AppConfig, FeatureFlags, OidcSettings, Routes};

    // MFA
    pub use crate::mfa::{
        FileStore, GuardOutcome, KeyValueStore, MemoryStore, MfaSession, OtpGuard, PendingAction,
    };

    // Auth types
    pub use crate::auth::{AccessClaims, AuthorizationRequest, ProviderMetadata, TokenSet, UserInfo};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::cache::{Mutation, QueryKey};
    #[cfg(feature = "http")]
    pub use crate::client::{
        AccountsClient, AuthClient, MarketClient, OtpClient, OtpVerified, PayoutsClient,
        PositionsClient, ProfileClient, ProtectedOutcome, TradesClient, TransactionsClient,
        WalletClient, WalletClientBuilder,
    };
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
    #[cfg(feature = "http")]
    pub use crate::http::{AccessTokenSource, StaticToken};
}
