//! Wire types for `POST /market/orders`.

use crate::domain::account::wire::AccountOut;
use crate::domain::position::wire::CryptoPositionOut;
use crate::shared::{AccountId, Side};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptoOrderRequest {
    pub account_id: AccountId,
    pub asset_symbol: String,
    pub asset_name: String,
    pub price_eur: Decimal,
    pub quantity: Decimal,
    pub side: Side,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptoOrderResponse {
    pub account: AccountOut,
    #[serde(default)]
    pub position: Option<CryptoPositionOut>,
}
