//! Account domain: cash accounts, balances and top-ups.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::shared::AccountId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A cash account of the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub currency: String,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Aggregate balance across accounts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AccountSummary {
    pub total_balance: Decimal,
    /// Currency of the first account; `None` when there are no accounts.
    pub currency: Option<String>,
}

impl AccountSummary {
    /// Balances are summed saturating at `Decimal::MIN`/`Decimal::MAX`.
    pub fn from_accounts(accounts: &[Account]) -> Self {
        Self {
            total_balance: accounts.iter().fold(Decimal::ZERO, |total, a| {
                total.checked_add(a.balance).unwrap_or(if a.balance.is_sign_negative() {
                    Decimal::MIN
                } else {
                    Decimal::MAX
                })
            }),
            currency: accounts.first().map(|a| a.currency.clone()),
        }
    }
}

/// A credit applied to an account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopUp {
    pub id: String,
    pub account_id: AccountId,
    pub amount: Decimal,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

/// Find an account by id.
pub fn find_account<'a>(accounts: &'a [Account], id: &AccountId) -> Option<&'a Account> {
    accounts.iter().find(|a| &a.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn account(id: &str, balance: &str, currency: &str) -> Account {
        Account {
            id: AccountId::from(id),
            name: format!("Account {id}"),
            currency: currency.to_string(),
            balance: Decimal::from_str(balance).unwrap(),
            created_at: DateTime::<Utc>::default(),
        }
    }

    #[test]
    fn summary_sums_balances_with_first_currency() {
        let accounts = vec![account("a", "100.50", "EUR"), account("b", "20.25", "USD")];
        let summary = AccountSummary::from_accounts(&accounts);
        assert_eq!(summary.total_balance, Decimal::from_str("120.75").unwrap());
        assert_eq!(summary.currency.as_deref(), Some("EUR"));
    }

    #[test]
    fn summary_saturates_instead_of_overflowing() {
        let mut huge = account("a", "0", "EUR");
        huge.balance = Decimal::MAX;
        let accounts = vec![huge.clone(), huge, account("c", "-1", "EUR")];
        let summary = AccountSummary::from_accounts(&accounts);
        assert_eq!(summary.total_balance, Decimal::MAX - Decimal::ONE);
    }

    #[test]
    fn summary_of_no_accounts() {
        let summary = AccountSummary::from_accounts(&[]);
        assert_eq!(summary.total_balance, Decimal::ZERO);
        assert_eq!(summary.currency, None);
    }

    #[test]
    fn find_by_id() {
        let accounts = vec![account("a", "1", "EUR"), account("b", "2", "EUR")];
        assert_eq!(
            find_account(&accounts, &AccountId::from("b")).map(|a| a.balance),
            Some(Decimal::from(2))
        );
        assert!(find_account(&accounts, &AccountId::from("z")).is_none());
    }
}
