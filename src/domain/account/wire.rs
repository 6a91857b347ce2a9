//! Wire types for account responses.

use crate::shared::{AccountId, WireNumber};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountOut {
    pub id: AccountId,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub balance: Option<WireNumber>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountListResponse {
    #[serde(default)]
    pub data: Vec<AccountOut>,
}

/// `POST /accounts/{id}/topup` body. The amount is sent as a decimal string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopUpRequest {
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopUpOut {
    pub id: String,
    pub account_id: AccountId,
    #[serde(default)]
    pub amount: Option<WireNumber>,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopUpListResponse {
    #[serde(default)]
    pub data: Vec<TopUpOut>,
}
