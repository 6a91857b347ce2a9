//! Payout domain: saved bank withdrawal methods and withdrawal requests.
//!
//! Creating a method and requesting a withdrawal both need a fresh MFA
//! session; the sub-client routes them through the OTP guard.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod validate;
pub mod wire;

use crate::shared::{AccountId, WithdrawalMethodId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use validate::{bic_valid, iban_checksum_valid, normalize_iban, withdrawal_fee};

/// Currency of every withdrawal.
pub const WITHDRAWAL_CURRENCY: &str = "EUR";

/// A saved bank account the user can withdraw to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WithdrawalMethod {
    pub id: WithdrawalMethodId,
    /// Method kind; `BANK_ACCOUNT` for every method the API creates today.
    pub method_type: String,
    pub iban: String,
    pub bic: Option<String>,
    pub bank_name: Option<String>,
    pub account_holder_name: String,
    pub is_default: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
}

impl WithdrawalMethod {
    /// IBAN for display: first four and last four characters, dots between.
    pub fn masked_iban(&self) -> String {
        mask_iban(&self.iban)
    }

    /// Only verified methods accept withdrawals.
    pub fn is_verified(&self) -> bool {
        self.status.eq_ignore_ascii_case("VERIFIED")
    }
}

/// Mask an IBAN as `IT60••••2345`. Values of six characters or fewer are
/// shown as they are.
pub fn mask_iban(iban: &str) -> String {
    let cleaned: Vec<char> = iban.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.len() <= 6 {
        return cleaned.into_iter().collect();
    }
    let head: String = cleaned[..4].iter().collect();
    let tail: String = cleaned[cleaned.len() - 4..].iter().collect();
    format!("{head}••••{tail}")
}

/// A withdrawal request as recorded by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Withdrawal {
    pub id: String,
    pub method_id: WithdrawalMethodId,
    pub account_id: AccountId,
    pub amount: Decimal,
    pub fee: Decimal,
    pub currency: String,
    pub total_debit: Decimal,
    pub status: String,
    pub requested_at: DateTime<Utc>,
    /// Human-readable reference, e.g. `WD-1A2B3C4D5E`.
    pub reference: String,
}

/// New withdrawal method form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WithdrawalMethodDraft {
    pub account_holder_name: String,
    pub iban: String,
    pub bic: Option<String>,
    pub bank_name: Option<String>,
    pub is_default: bool,
}

impl WithdrawalMethodDraft {
    pub fn new(account_holder_name: impl Into<String>, iban: impl Into<String>) -> Self {
        Self {
            account_holder_name: account_holder_name.into(),
            iban: iban.into(),
            ..Self::default()
        }
    }

    pub fn bic(mut self, bic: impl Into<String>) -> Self {
        self.bic = Some(bic.into());
        self
    }

    pub fn bank_name(mut self, bank_name: impl Into<String>) -> Self {
        self.bank_name = Some(bank_name.into());
        self
    }

    pub fn default_method(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }
}

/// Withdrawal form: source account, target method and the typed amount.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WithdrawalDraft {
    pub account_id: Option<AccountId>,
    pub method_id: Option<WithdrawalMethodId>,
    pub amount_input: String,
}

impl WithdrawalDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(mut self, account_id: impl Into<AccountId>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    pub fn method(mut self, method_id: impl Into<WithdrawalMethodId>) -> Self {
        self.method_id = Some(method_id.into());
        self
    }

    pub fn amount(mut self, input: impl Into<String>) -> Self {
        self.amount_input = input.into();
        self
    }
}

/// Fee and total debit shown before confirming a withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalPreview {
    pub amount: Decimal,
    pub fee: Decimal,
    pub total_debit: Decimal,
}
