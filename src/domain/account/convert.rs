//! Conversions from wire types to account view models.

use super::wire::{AccountOut, TopUpOut};
use super::{Account, TopUp};
use crate::shared::parse_amount;
use crate::shared::serde_util::timestamp_or_epoch;

impl From<AccountOut> for Account {
    fn from(a: AccountOut) -> Self {
        Self {
            balance: parse_amount(a.balance.as_ref()),
            created_at: timestamp_or_epoch(a.created_at.as_deref().unwrap_or_default()),
            id: a.id,
            name: a.name,
            currency: a.currency,
        }
    }
}

impl From<TopUpOut> for TopUp {
    fn from(t: TopUpOut) -> Self {
        Self {
            amount: parse_amount(t.amount.as_ref()),
            created_at: timestamp_or_epoch(t.created_at.as_deref().unwrap_or_default()),
            id: t.id,
            account_id: t.account_id,
            currency: t.currency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::wire::AccountListResponse;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn account_list_from_backend_json() {
        let json = r#"{"data":[{
            "id":"6f1c2f1e-0000-4000-8000-000000000001",
            "user_id":"u-1",
            "currency":"EUR",
            "balance":"1520.40",
            "name":"Conto principale",
            "created_at":"2024-03-01T09:30:00Z"
        }]}"#;
        let resp: AccountListResponse = serde_json::from_str(json).unwrap();
        let accounts: Vec<Account> = resp.data.into_iter().map(Account::from).collect();

        assert_eq!(accounts.len(), 1);
        let account = &accounts[0];
        assert_eq!(account.id.as_str(), "6f1c2f1e-0000-4000-8000-000000000001");
        assert_eq!(account.name, "Conto principale");
        assert_eq!(account.balance, Decimal::from_str("1520.40").unwrap());
        assert_eq!(
            account.created_at,
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn malformed_balance_becomes_zero() {
        for raw in [r#""abc""#, "null", r#""""#] {
            let json = format!(
                r#"{{"id":"a","currency":"EUR","balance":{raw},"name":"x","created_at":"2024-01-01T00:00:00Z"}}"#
            );
            let out: AccountOut = serde_json::from_str(&json).unwrap();
            assert_eq!(Account::from(out).balance, Decimal::ZERO, "balance {raw}");
        }
    }

    #[test]
    fn numeric_balance_is_accepted() {
        let out: AccountOut =
            serde_json::from_str(r#"{"id":"a","currency":"EUR","balance":12.5,"name":"x"}"#).unwrap();
        let account = Account::from(out);
        assert_eq!(account.balance, Decimal::from_str("12.5").unwrap());
        assert_eq!(account.created_at, chrono::DateTime::<Utc>::default());
    }

    #[test]
    fn top_up_conversion() {
        let out: TopUpOut = serde_json::from_str(
            r#"{"id":"t1","account_id":"a","amount":"50.00","currency":"EUR","created_at":"2024-05-02T10:00:00+02:00"}"#,
        )
        .unwrap();
        let top_up = TopUp::from(out);
        assert_eq!(top_up.amount, Decimal::from_str("50.00").unwrap());
        assert_eq!(top_up.account_id.as_str(), "a");
        assert_eq!(
            top_up.created_at,
            Utc.with_ymd_and_hms(2024, 5, 2, 8, 0, 0).unwrap()
        );
    }
}
