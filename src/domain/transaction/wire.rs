//! Wire types for transaction payloads.

use crate::shared::{AccountId, Direction, WireNumber};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionOut {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub account_id: AccountId,
    #[serde(default)]
    pub amount: Option<WireNumber>,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub idem_key: Option<String>,
    pub direction: Direction,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionListResponse {
    #[serde(default)]
    pub data: Vec<TransactionOut>,
}

/// `POST /transactions` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionCreate {
    pub account_id: AccountId,
    pub amount: Decimal,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub direction: Direction,
    pub idem_key: String,
}

/// `POST /transactions` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub data: TransactionOut,
}
