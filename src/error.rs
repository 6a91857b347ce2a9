//! Unified SDK error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Local validation failed; no request was sent.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl SdkError {
    /// The message to surface in an inline alert.
    ///
    /// Server errors show the normalized detail only, without the layer prefix.
    pub fn user_message(&self) -> String {
        match self {
            SdkError::Http(HttpError::Api { message, .. }) => message.clone(),
            SdkError::Validation(e) => e.to_string(),
            other => other.to_string(),
        }
    }

    /// HTTP status of a server error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            SdkError::Http(e) => e.status(),
            _ => None,
        }
    }
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Non-2xx response. `message` is derived from the body when it carries a
    /// readable detail, otherwise it is the generic status message.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        detail: Option<serde_json::Value>,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

impl HttpError {
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// The backend answers 403 when an operation needs a fresh MFA session.
    pub fn is_mfa_required(&self) -> bool {
        self.status() == Some(403)
    }
}

/// Authentication errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Token expired")]
    TokenExpired,

    #[error("No refresh token available")]
    MissingRefreshToken,

    #[error("No sign-in in progress")]
    NoPendingSignIn,

    #[error("State mismatch in authorization response")]
    StateMismatch,

    #[error("Authorization response is missing the code")]
    MissingCode,

    #[error("Identity provider error: {error} ({})", .description.as_deref().unwrap_or("no description"))]
    Provider {
        error: String,
        description: Option<String>,
    },

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Invalid provider endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Local validation errors, raised before any request is sent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Select an asset to trade.")]
    MissingAsset,

    #[error("Asset not specified.")]
    MissingAssetId,

    #[error("Select an account to use.")]
    MissingAccount,

    #[error("Select a withdrawal method.")]
    MissingWithdrawalMethod,

    #[error("Enter a valid quantity greater than zero.")]
    NonPositiveQuantity,

    #[error("Quantity {quantity} exceeds the maximum tradable amount of {max}.")]
    QuantityExceedsMax { quantity: Decimal, max: Decimal },

    #[error("Enter a valid amount greater than zero.")]
    NonPositiveAmount,

    #[error("The amount is too large.")]
    AmountOutOfRange,

    #[error("Insufficient balance: {required} required, {available} available.")]
    InsufficientBalance {
        required: Decimal,
        available: Decimal,
    },

    #[error("Enter an IBAN.")]
    MissingIban,

    #[error("Invalid IBAN.")]
    InvalidIban,

    #[error("Invalid BIC/SWIFT code.")]
    InvalidBic,

    #[error("The passwords do not match.")]
    PasswordMismatch,

    #[error("The new password must be at least {min} characters long.")]
    PasswordTooShort { min: usize },

    #[error("Nothing to update.")]
    EmptyProfileUpdate,

    #[error("Request an OTP code first.")]
    MissingOtpChallenge,

    #[error("Enter the code you received.")]
    MissingOtpCode,
}

/// Key-value storage errors (MFA session persistence).
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt store: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    Poisoned,
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment error: {0}")]
    Env(#[from] envy::Error),

    #[error("Invalid URL for {name}: {value}")]
    InvalidUrl { name: &'static str, value: String },
}
