//! Positions sub-client.

use crate::cache::QueryKey;
use crate::client::WalletClient;
use crate::domain::position::wire::CryptoPositionListResponse;
use crate::domain::position::Portfolio;
use crate::error::SdkError;

pub struct Positions<'a> {
    pub(crate) client: &'a WalletClient,
}

impl<'a> Positions<'a> {
    /// `GET /crypto-positions`. Cached.
    pub async fn list(&self) -> Result<Portfolio, SdkError> {
        if let Some(portfolio) = self.client.cache.get(&QueryKey::CryptoPositions).await {
            return Ok(portfolio);
        }
        let resp: CryptoPositionListResponse = self
            .client
            .http
            .get("/crypto-positions", self.client.read_retry.clone())
            .await?;
        let portfolio = Portfolio::from(resp);
        self.client
            .cache
            .insert(QueryKey::CryptoPositions, portfolio.clone())
            .await;
        Ok(portfolio)
    }
}
