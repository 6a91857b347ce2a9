//! HTTP client layer: `WalletHttp` with bearer injection and retry policies.

pub mod client;
pub mod retry;

pub use client::{normalize_api_error, AccessTokenSource, StaticToken, WalletHttp};
pub use retry::{RetryConfig, RetryPolicy};
