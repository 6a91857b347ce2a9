//! Wire types for crypto position payloads.

use crate::shared::WireNumber;
use serde::{Deserialize, Serialize};

/// A position as sent by `/crypto-positions`, `/market/orders` and the asset
/// detail endpoint. Amounts may be strings or numbers depending on the route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptoPositionOut {
    pub id: String,
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: Option<WireNumber>,
    #[serde(default)]
    pub eur_value: Option<WireNumber>,
    #[serde(default)]
    pub change_24h_percent: Option<WireNumber>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub price_source: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub synced_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptoPositionListResponse {
    #[serde(default)]
    pub data: Vec<CryptoPositionOut>,
    #[serde(default)]
    pub total_eur_value: Option<WireNumber>,
}
