//! Transaction domain: the ledger of buys and sells.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::error::ValidationError;
use crate::shared::{AccountId, Direction};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A recorded transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub account_id: AccountId,
    pub amount: Decimal,
    pub currency: String,
    pub category: Option<String>,
    pub direction: Direction,
    pub created_at: DateTime<Utc>,
}

/// Server-side filters for `GET /transactions`. Both dates are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub category: Option<String>,
}

impl TransactionFilter {
    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none() && self.category.is_none()
    }

    /// Query string including the leading `?`, or empty.
    pub fn to_query(&self) -> String {
        let mut params = Vec::new();
        if let Some(from) = self.from {
            params.push(format!("from={}", from.format("%Y-%m-%d")));
        }
        if let Some(to) = self.to {
            params.push(format!("to={}", to.format("%Y-%m-%d")));
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            params.push(format!("category={}", urlencoding::encode(category)));
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

/// A transaction to record. `idem_key` makes retries safe: the server
/// returns the existing record for a key it has already seen.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub account_id: AccountId,
    pub amount: Decimal,
    pub currency: String,
    pub category: Option<String>,
    pub direction: Direction,
    pub idem_key: String,
}

impl NewTransaction {
    /// A new EUR transaction with a random idempotency key.
    pub fn new(account_id: AccountId, amount: Decimal, direction: Direction) -> Self {
        Self {
            account_id,
            amount,
            currency: "EUR".to_string(),
            category: None,
            direction,
            idem_key: random_idem_key(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.account_id.as_str().is_empty() {
            return Err(ValidationError::MissingAccount);
        }
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }
        Ok(())
    }
}

fn random_idem_key() -> String {
    rand::random::<[u8; 16]>()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
