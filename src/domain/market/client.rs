//! Market sub-client: quotes and asset detail.

use crate::cache::QueryKey;
use crate::client::WalletClient;
use crate::domain::market::wire::{AssetDetailResponse, MarketPricesResponse};
use crate::domain::market::{clamp_history_days, AssetDetail, MarketAsset, DEFAULT_HISTORY_DAYS};
use crate::error::{SdkError, ValidationError};

pub struct Market<'a> {
    pub(crate) client: &'a WalletClient,
}

impl<'a> Market<'a> {
    /// `GET /market/prices`. Cached.
    pub async fn prices(&self) -> Result<Vec<MarketAsset>, SdkError> {
        if let Some(assets) = self.client.cache.get(&QueryKey::MarketPrices).await {
            return Ok(assets);
        }
        let resp: MarketPricesResponse = self
            .client
            .http
            .get("/market/prices", self.client.read_retry.clone())
            .await?;
        let assets: Vec<MarketAsset> = resp.data.into_iter().map(MarketAsset::from).collect();
        self.client
            .cache
            .insert(QueryKey::MarketPrices, assets.clone())
            .await;
        Ok(assets)
    }

    /// Asset detail with the default history window. Cached per asset id.
    pub async fn asset(&self, asset_id: &str) -> Result<AssetDetail, SdkError> {
        let asset_id = asset_id.trim();
        if asset_id.is_empty() {
            return Err(ValidationError::MissingAssetId.into());
        }
        let key = QueryKey::MarketAsset(asset_id.to_string());
        if let Some(detail) = self.client.cache.get(&key).await {
            return Ok(detail);
        }
        let detail = self.fetch_asset(asset_id, DEFAULT_HISTORY_DAYS).await?;
        self.client.cache.insert(key, detail.clone()).await;
        Ok(detail)
    }

    /// Asset detail with a custom history window (1 to 30 days). Not cached.
    pub async fn asset_with_history(
        &self,
        asset_id: &str,
        days: u32,
    ) -> Result<AssetDetail, SdkError> {
        let asset_id = asset_id.trim();
        if asset_id.is_empty() {
            return Err(ValidationError::MissingAssetId.into());
        }
        self.fetch_asset(asset_id, clamp_history_days(days)).await
    }

    async fn fetch_asset(&self, asset_id: &str, days: u32) -> Result<AssetDetail, SdkError> {
        let mut path = format!("/market/assets/{}", urlencoding::encode(asset_id));
        if days != DEFAULT_HISTORY_DAYS {
            path = format!("{}?days={}", path, days);
        }
        let resp: AssetDetailResponse = self
            .client
            .http
            .get(&path, self.client.read_retry.clone())
            .await?;
        Ok(resp.into())
    }
}
