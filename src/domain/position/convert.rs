//! Conversions from wire types to position view models.

use super::wire::{CryptoPositionListResponse, CryptoPositionOut};
use super::{CryptoPosition, Portfolio};
use crate::shared::serde_util::{parse_timestamp, timestamp_or_epoch};
use crate::shared::{parse_amount, parse_optional_amount, AccountId};

impl From<CryptoPositionOut> for CryptoPosition {
    fn from(p: CryptoPositionOut) -> Self {
        Self {
            amount: parse_amount(p.amount.as_ref()),
            eur_value: parse_amount(p.eur_value.as_ref()),
            change_24h_percent: parse_optional_amount(p.change_24h_percent.as_ref()),
            account_id: p.account_id.map(AccountId::from),
            synced_at: p.synced_at.as_deref().and_then(parse_timestamp),
            created_at: timestamp_or_epoch(p.created_at.as_deref().unwrap_or_default()),
            updated_at: timestamp_or_epoch(p.updated_at.as_deref().unwrap_or_default()),
            id: p.id,
            ticker: p.ticker,
            name: p.name,
            icon_url: p.icon_url,
            price_source: p.price_source,
            network: p.network,
        }
    }
}

impl From<CryptoPositionListResponse> for Portfolio {
    fn from(resp: CryptoPositionListResponse) -> Self {
        Self {
            total_value: parse_amount(resp.total_eur_value.as_ref()),
            positions: resp.data.into_iter().map(CryptoPosition::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn portfolio_from_list_response() {
        let json = r#"{
            "data":[{
                "id":"p1","ticker":"BTC","name":"Bitcoin","amount":"0.25000000",
                "eur_value":"15000.00","change_24h_percent":"-1.25",
                "icon_url":"https://assets.example/btc.png","price_source":"coincap",
                "network":"bitcoin","account_id":"a1","synced_at":null,
                "created_at":"2024-01-01T00:00:00Z","updated_at":"2024-01-02T00:00:00Z"
            }],
            "total_eur_value":"15000.00"
        }"#;
        let resp: CryptoPositionListResponse = serde_json::from_str(json).unwrap();
        let portfolio = Portfolio::from(resp);

        assert_eq!(portfolio.total_value, Decimal::from_str("15000.00").unwrap());
        let btc = &portfolio.positions[0];
        assert_eq!(btc.amount, Decimal::from_str("0.25").unwrap());
        assert_eq!(btc.change_24h_percent, Some(Decimal::from_str("-1.25").unwrap()));
        assert_eq!(btc.account_id.as_ref().map(|a| a.as_str()), Some("a1"));
        assert_eq!(btc.synced_at, None);
    }

    #[test]
    fn null_change_stays_none_malformed_becomes_zero() {
        let null_change: CryptoPositionOut = serde_json::from_str(
            r#"{"id":"p","ticker":"ETH","name":"Ether","amount":1,"eur_value":2,"change_24h_percent":null}"#,
        )
        .unwrap();
        assert_eq!(CryptoPosition::from(null_change).change_24h_percent, None);

        let bad_change: CryptoPositionOut = serde_json::from_str(
            r#"{"id":"p","ticker":"ETH","name":"Ether","amount":"x","eur_value":"2","change_24h_percent":"n/a"}"#,
        )
        .unwrap();
        let position = CryptoPosition::from(bad_change);
        assert_eq!(position.change_24h_percent, Some(Decimal::ZERO));
        assert_eq!(position.amount, Decimal::ZERO);
    }
}
