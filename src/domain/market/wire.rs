//! Wire types for market payloads.
//!
//! Market data comes from an upstream quote provider and is sent as plain
//! JSON numbers, unlike the decimal strings of ledger records.

use crate::domain::position::wire::CryptoPositionOut;
use crate::domain::transaction::wire::TransactionOut;
use crate::shared::WireNumber;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketAssetOut {
    pub id: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Option<WireNumber>,
    #[serde(default, rename = "change24h")]
    pub change_24h: Option<WireNumber>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub market_cap: Option<WireNumber>,
    #[serde(default)]
    pub explorer_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketPricesResponse {
    #[serde(default)]
    pub data: Vec<MarketAssetOut>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePointOut {
    /// Unix milliseconds.
    #[serde(default)]
    pub timestamp: Option<WireNumber>,
    #[serde(default)]
    pub price: Option<WireNumber>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetDetailResponse {
    pub asset: MarketAssetOut,
    #[serde(default)]
    pub history: Vec<PricePointOut>,
    #[serde(default)]
    pub position: Option<CryptoPositionOut>,
    #[serde(default)]
    pub transactions: Vec<TransactionOut>,
}
