//! Local trade checks, run before any request.

use super::{TradeDraft, TradeIntent};
use crate::domain::account::{find_account, Account};
use crate::error::ValidationError;
use crate::shared::{parse_quantity_input, Side};
use rust_decimal::Decimal;

/// Largest quantity the user can trade.
///
/// Selling is capped by the held amount; buying by what the balance pays for
/// at `price`, or zero when the price is not positive.
pub fn max_quantity(side: Side, held: Decimal, balance: Decimal, price: Decimal) -> Decimal {
    match side {
        Side::Sell => held.max(Decimal::ZERO),
        Side::Buy if price <= Decimal::ZERO => Decimal::ZERO,
        Side::Buy => balance.max(Decimal::ZERO).checked_div(price).unwrap_or(Decimal::ZERO),
    }
}

/// Preview of the order value in EUR.
pub fn trade_value(price: Decimal, quantity: Decimal) -> Decimal {
    price.checked_mul(quantity).unwrap_or(Decimal::ZERO)
}

impl TradeDraft {
    /// Parsed quantity; blank or malformed input is zero.
    pub fn parsed_quantity(&self) -> Decimal {
        parse_quantity_input(&self.quantity_input)
    }

    /// Value preview at the draft's price, zero without an asset.
    pub fn value_preview(&self) -> Decimal {
        self.asset
            .as_ref()
            .map(|a| trade_value(a.price_eur, self.parsed_quantity()))
            .unwrap_or(Decimal::ZERO)
    }

    /// Max tradable quantity given the user's accounts and held amount of
    /// the draft's asset.
    pub fn max_quantity(&self, accounts: &[Account], held: Decimal) -> Decimal {
        let balance = self
            .account_id
            .as_ref()
            .and_then(|id| find_account(accounts, id))
            .map(|a| a.balance)
            .unwrap_or(Decimal::ZERO);
        let price = self
            .asset
            .as_ref()
            .map(|a| a.price_eur)
            .unwrap_or(Decimal::ZERO);
        max_quantity(self.side, held, balance, price)
    }

    /// Check the draft and build the order.
    ///
    /// `held` is the amount of the draft's asset currently held (zero if none).
    pub fn validate(&self, accounts: &[Account], held: Decimal) -> Result<TradeIntent, ValidationError> {
        let asset = self.asset.as_ref().ok_or(ValidationError::MissingAsset)?;
        let account_id = self
            .account_id
            .as_ref()
            .filter(|id| find_account(accounts, id).is_some())
            .ok_or(ValidationError::MissingAccount)?;

        let quantity = self.parsed_quantity();
        if quantity <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveQuantity);
        }
        let max = self.max_quantity(accounts, held);
        if quantity > max {
            return Err(ValidationError::QuantityExceedsMax { quantity, max });
        }

        Ok(TradeIntent {
            account_id: account_id.clone(),
            asset_symbol: asset.symbol.clone(),
            asset_name: asset.name.clone(),
            price_eur: asset.price_eur,
            quantity,
            side: self.side,
        })
    }
}
