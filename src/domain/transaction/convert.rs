//! Conversions between transaction wire types and view models.

use super::wire::{TransactionCreate, TransactionOut};
use super::{NewTransaction, Transaction};
use crate::shared::parse_amount;
use crate::shared::serde_util::timestamp_or_epoch;

impl From<TransactionOut> for Transaction {
    fn from(t: TransactionOut) -> Self {
        Self {
            amount: parse_amount(t.amount.as_ref()),
            created_at: timestamp_or_epoch(t.created_at.as_deref().unwrap_or_default()),
            id: t.id,
            account_id: t.account_id,
            currency: t.currency,
            category: t.category,
            direction: t.direction,
        }
    }
}

impl From<NewTransaction> for TransactionCreate {
    fn from(n: NewTransaction) -> Self {
        Self {
            account_id: n.account_id,
            amount: n.amount,
            currency: n.currency,
            category: n.category,
            direction: n.direction,
            idem_key: n.idem_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transaction::wire::TransactionListResponse;
    use crate::shared::Side;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn list_response_conversion() {
        let json = r#"{"data":[
            {"id":"t1","user_id":"u","account_id":"a1","amount":"99.90","currency":"EUR",
             "category":"crypto","idem_key":"k1","direction":"buy","created_at":"2024-02-10T12:00:00Z"},
            {"id":"t2","user_id":"u","account_id":"a1","amount":12,"currency":"EUR",
             "category":null,"idem_key":"k2","direction":"sell","created_at":"2024-02-09 08:00:00"}
        ]}"#;
        let resp: TransactionListResponse = serde_json::from_str(json).unwrap();
        let txs: Vec<Transaction> = resp.data.into_iter().map(Transaction::from).collect();

        assert_eq!(txs[0].amount, Decimal::from_str("99.90").unwrap());
        assert_eq!(txs[0].direction, Side::Buy);
        assert_eq!(txs[0].category.as_deref(), Some("crypto"));
        assert_eq!(txs[1].amount, Decimal::from(12));
        assert_eq!(txs[1].direction, Side::Sell);
        assert_eq!(txs[1].category, None);
        assert_eq!(txs[1].created_at.to_rfc3339(), "2024-02-09T08:00:00+00:00");
    }

    #[test]
    fn detail_transactions_without_user_fields() {
        let out: TransactionOut = serde_json::from_str(
            r#"{"id":"t","account_id":"a","amount":"1.5","currency":"EUR","direction":"buy","created_at":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(Transaction::from(out).amount, Decimal::from_str("1.5").unwrap());
    }

    #[test]
    fn create_body_serializes_amount_as_string() {
        let mut new = NewTransaction::new("a".into(), Decimal::from_str("10.50").unwrap(), Side::Buy);
        new.idem_key = "fixed".into();
        let body = serde_json::to_value(TransactionCreate::from(new)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "account_id": "a",
                "amount": "10.50",
                "currency": "EUR",
                "direction": "buy",
                "idem_key": "fixed"
            })
        );
    }
}
