//! Market domain: asset prices, history and per-asset detail.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::domain::position::CryptoPosition;
use crate::domain::transaction::Transaction;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default history window of the asset detail, in days.
pub const DEFAULT_HISTORY_DAYS: u32 = 7;
/// Longest history window the API serves, in days.
pub const MAX_HISTORY_DAYS: u32 = 30;

/// A tradable asset with its current quote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketAsset {
    /// Provider id (e.g. `bitcoin`), used in detail routes.
    pub id: String,
    /// Ticker (e.g. `BTC`).
    pub symbol: String,
    pub name: String,
    /// Price in EUR.
    pub price: Decimal,
    /// 24h change in percent.
    pub change_24h: Decimal,
    pub image: Option<String>,
    pub market_cap: Option<Decimal>,
    pub explorer_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: Decimal,
}

/// Asset detail: quote, history and the user's holdings in it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetDetail {
    pub asset: MarketAsset,
    pub history: Vec<PricePoint>,
    pub position: Option<CryptoPosition>,
    pub transactions: Vec<Transaction>,
}

impl AssetDetail {
    /// Quantity of the asset currently held.
    pub fn held_amount(&self) -> Decimal {
        self.position
            .as_ref()
            .map(|p| p.amount)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Clamp a requested history window to what the API accepts.
pub fn clamp_history_days(days: u32) -> u32 {
    days.clamp(1, MAX_HISTORY_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_days_are_clamped() {
        assert_eq!(clamp_history_days(0), 1);
        assert_eq!(clamp_history_days(7), 7);
        assert_eq!(clamp_history_days(90), 30);
    }
}
