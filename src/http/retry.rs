//! Retry policies for reads.
//!
//! Wallet requests are sent once. The client builder can opt GET requests
//! into [`RetryPolicy::Idempotent`]; mutations (orders, top-ups, withdrawals)
//! never retry because the server may already have applied them.

use crate::error::HttpError;
use std::time::Duration;

/// How a GET request reacts to transient failures.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RetryPolicy {
    /// Single attempt.
    #[default]
    None,
    /// [`RetryConfig::idempotent`].
    Idempotent,
    Custom(RetryConfig),
}

impl RetryPolicy {
    /// The effective config, `None` for a single attempt.
    pub fn config(&self) -> Option<RetryConfig> {
        match self {
            RetryPolicy::None => None,
            RetryPolicy::Idempotent => Some(RetryConfig::idempotent()),
            RetryPolicy::Custom(config) => Some(config.clone()),
        }
    }
}

/// Exponential backoff with optional jitter.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_factor: f64,
    /// Spread each delay by up to ±25%.
    pub jitter: bool,
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::idempotent()
    }
}

impl RetryConfig {
    /// Three retries from 200 ms, doubling up to 5 s, on 429 and gateway errors.
    pub fn idempotent() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![429, 502, 503, 504],
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    /// Whether `error` is worth another attempt: a listed status, or a
    /// connection-level failure.
    pub fn should_retry(&self, error: &HttpError) -> bool {
        match error {
            HttpError::Api { status, .. } => self.retryable_statuses.contains(status),
            #[cfg(feature = "http")]
            HttpError::Reqwest(e) => {
                #[cfg(not(target_arch = "wasm32"))]
                let transient = e.is_connect() || e.is_timeout() || e.is_request();
                #[cfg(target_arch = "wasm32")]
                let transient = e.is_timeout() || e.is_request();
                transient
            }
            _ => false,
        }
    }

    /// Delay before retry number `attempt` (0-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let max_secs = self.max_delay.as_secs_f64();
        let secs = (self.initial_delay.as_secs_f64() * self.backoff_factor.powi(exponent))
            .min(max_secs);
        let secs = if self.jitter {
            let spread = secs * 0.25;
            (secs + (rand::random::<f64>() * 2.0 - 1.0) * spread).max(0.0)
        } else {
            secs
        };
        Duration::try_from_secs_f64(secs).unwrap_or(self.max_delay)
    }
}
