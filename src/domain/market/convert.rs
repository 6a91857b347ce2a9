//! Conversions from wire types to market view models.

use super::wire::{AssetDetailResponse, MarketAssetOut, PricePointOut};
use super::{AssetDetail, MarketAsset, PricePoint};
use crate::domain::position::CryptoPosition;
use crate::domain::transaction::Transaction;
use crate::shared::serde_util::millis_or_epoch;
use crate::shared::{parse_amount, parse_optional_amount};

impl From<MarketAssetOut> for MarketAsset {
    fn from(a: MarketAssetOut) -> Self {
        Self {
            price: parse_amount(a.price.as_ref()),
            change_24h: parse_amount(a.change_24h.as_ref()),
            market_cap: parse_optional_amount(a.market_cap.as_ref()),
            id: a.id,
            symbol: a.symbol,
            name: a.name,
            image: a.image,
            explorer_url: a.explorer_url,
        }
    }
}

impl From<PricePointOut> for PricePoint {
    fn from(p: PricePointOut) -> Self {
        Self {
            timestamp: millis_or_epoch(p.timestamp.as_ref()),
            price: parse_amount(p.price.as_ref()),
        }
    }
}

impl From<AssetDetailResponse> for AssetDetail {
    fn from(d: AssetDetailResponse) -> Self {
        Self {
            asset: d.asset.into(),
            history: d.history.into_iter().map(PricePoint::from).collect(),
            position: d.position.map(CryptoPosition::from),
            transactions: d.transactions.into_iter().map(Transaction::from).collect(),
        }
    }
}
