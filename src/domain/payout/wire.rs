//! Wire types for `/payouts`.

use crate::shared::{AccountId, WireNumber, WithdrawalMethodId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body of `POST /payouts/withdrawal-methods`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalMethodCreate {
    pub account_holder_name: String,
    pub iban: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalMethodOut {
    pub id: WithdrawalMethodId,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(rename = "type", default)]
    pub method_type: String,
    pub iban: String,
    #[serde(default)]
    pub bic: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub account_holder_name: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub verified_at: Option<String>,
}

/// Body of `POST /payouts/withdrawals`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    pub account_id: AccountId,
    pub method_id: WithdrawalMethodId,
    pub amount: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalOut {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub method_id: WithdrawalMethodId,
    pub account_id: AccountId,
    #[serde(default)]
    pub amount: Option<WireNumber>,
    #[serde(default)]
    pub fee: Option<WireNumber>,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub total_debit: Option<WireNumber>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub requested_at: Option<String>,
    #[serde(default)]
    pub reference: String,
}
