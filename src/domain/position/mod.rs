//! Position domain: crypto holdings and their EUR valuation.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::shared::AccountId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A held quantity of one crypto asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CryptoPosition {
    pub id: String,
    pub ticker: String,
    pub name: String,
    pub amount: Decimal,
    pub eur_value: Decimal,
    pub change_24h_percent: Option<Decimal>,
    pub icon_url: Option<String>,
    pub price_source: Option<String>,
    pub network: Option<String>,
    pub account_id: Option<AccountId>,
    pub synced_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// All positions plus the server-computed total.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Portfolio {
    pub positions: Vec<CryptoPosition>,
    pub total_value: Decimal,
}

impl Portfolio {
    /// Position for a ticker, case-insensitive.
    pub fn find(&self, ticker: &str) -> Option<&CryptoPosition> {
        self.positions
            .iter()
            .find(|p| p.ticker.eq_ignore_ascii_case(ticker))
    }

    /// Held amount for a ticker, zero when not held.
    pub fn held_amount(&self, ticker: &str) -> Decimal {
        self.find(ticker).map(|p| p.amount).unwrap_or(Decimal::ZERO)
    }
}
