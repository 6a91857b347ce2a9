//! Trades sub-client: validated crypto orders.

use crate::cache::Mutation;
use crate::client::WalletClient;
use crate::domain::trade::wire::{CryptoOrderRequest, CryptoOrderResponse};
use crate::domain::trade::{CryptoOrderResult, TradeDraft, TradeIntent};
use crate::error::{SdkError, ValidationError};
use crate::shared::Side;
use rust_decimal::Decimal;

pub struct Trades<'a> {
    pub(crate) client: &'a WalletClient,
}

impl<'a> Trades<'a> {
    /// Validate a draft against current balances and holdings, then place it.
    ///
    /// Nothing is posted when validation fails.
    pub async fn submit(&self, draft: &TradeDraft) -> Result<CryptoOrderResult, SdkError> {
        let asset = draft.asset.as_ref().ok_or(ValidationError::MissingAsset)?;
        let accounts = self.client.accounts().list().await?;
        let held = match draft.side {
            Side::Sell => self
                .client
                .positions()
                .list()
                .await?
                .held_amount(&asset.symbol),
            Side::Buy => Decimal::ZERO,
        };
        let intent = draft.validate(&accounts, held)?;
        self.place(&intent).await
    }

    /// `POST /market/orders` for an already validated intent.
    pub async fn place(&self, intent: &TradeIntent) -> Result<CryptoOrderResult, SdkError> {
        tracing::debug!(
            side = %intent.side,
            asset = %intent.asset_symbol,
            quantity = %intent.quantity,
            "Placing order"
        );
        let resp: CryptoOrderResponse = self
            .client
            .http
            .post("/market/orders", &CryptoOrderRequest::from(intent))
            .await?;
        self.client.cache.invalidate(Mutation::PlaceOrder).await;
        Ok(resp.into())
    }
}
