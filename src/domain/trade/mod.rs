//! Trade domain: composing and placing crypto buy/sell orders.
//!
//! A [`TradeDraft`] holds what the user picked and typed. Validation turns it
//! into a [`TradeIntent`] or a [`ValidationError`](crate::error::ValidationError);
//! only an intent is ever sent to `POST /market/orders`.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod validate;
pub mod wire;

use crate::domain::account::Account;
use crate::domain::market::MarketAsset;
use crate::domain::position::CryptoPosition;
use crate::shared::{AccountId, Side};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use validate::{max_quantity, trade_value};

/// A validated order, ready to submit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeIntent {
    pub account_id: AccountId,
    pub asset_symbol: String,
    pub asset_name: String,
    pub price_eur: Decimal,
    pub quantity: Decimal,
    pub side: Side,
}

impl TradeIntent {
    pub fn value(&self) -> Decimal {
        trade_value(self.price_eur, self.quantity)
    }
}

/// The asset a draft refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftAsset {
    pub symbol: String,
    pub name: String,
    pub price_eur: Decimal,
}

impl From<&MarketAsset> for DraftAsset {
    fn from(a: &MarketAsset) -> Self {
        Self {
            symbol: a.symbol.clone(),
            name: a.name.clone(),
            price_eur: a.price,
        }
    }
}

/// Order form state, possibly incomplete.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeDraft {
    pub asset: Option<DraftAsset>,
    pub account_id: Option<AccountId>,
    pub side: Side,
    /// Quantity exactly as typed.
    pub quantity_input: String,
}

impl TradeDraft {
    pub fn new(side: Side) -> Self {
        Self {
            asset: None,
            account_id: None,
            side,
            quantity_input: String::new(),
        }
    }

    pub fn asset(mut self, asset: &MarketAsset) -> Self {
        self.asset = Some(DraftAsset::from(asset));
        self
    }

    pub fn account(mut self, account_id: impl Into<AccountId>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    pub fn quantity(mut self, input: impl Into<String>) -> Self {
        self.quantity_input = input.into();
        self
    }
}

/// Result of a placed order: the debited/credited account and the position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CryptoOrderResult {
    pub account: Account,
    pub position: Option<CryptoPosition>,
}
