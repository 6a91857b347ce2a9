//! Conversions for order requests and results.

use super::wire::{CryptoOrderRequest, CryptoOrderResponse};
use super::{CryptoOrderResult, TradeIntent};
use crate::domain::position::CryptoPosition;

impl From<&TradeIntent> for CryptoOrderRequest {
    fn from(i: &TradeIntent) -> Self {
        Self {
            account_id: i.account_id.clone(),
            asset_symbol: i.asset_symbol.clone(),
            asset_name: i.asset_name.clone(),
            price_eur: i.price_eur,
            quantity: i.quantity,
            side: i.side,
        }
    }
}

impl From<CryptoOrderResponse> for CryptoOrderResult {
    fn from(r: CryptoOrderResponse) -> Self {
        Self {
            account: r.account.into(),
            position: r.position.map(CryptoPosition::from),
        }
    }
}
