//! Accounts sub-client: balances and top-ups.

use crate::cache::{Mutation, QueryKey};
use crate::client::WalletClient;
use crate::domain::account::wire::{AccountListResponse, AccountOut, TopUpListResponse, TopUpRequest};
use crate::domain::account::{Account, AccountSummary, TopUp};
use crate::error::{SdkError, ValidationError};
use crate::shared::AccountId;
use rust_decimal::Decimal;

pub struct Accounts<'a> {
    pub(crate) client: &'a WalletClient,
}

impl<'a> Accounts<'a> {
    /// `GET /accounts`. Cached for the key's stale time.
    pub async fn list(&self) -> Result<Vec<Account>, SdkError> {
        if let Some(accounts) = self.client.cache.get(&QueryKey::Accounts).await {
            return Ok(accounts);
        }
        let resp: AccountListResponse = self
            .client
            .http
            .get("/accounts", self.client.read_retry.clone())
            .await?;
        let accounts: Vec<Account> = resp.data.into_iter().map(Account::from).collect();
        self.client
            .cache
            .insert(QueryKey::Accounts, accounts.clone())
            .await;
        Ok(accounts)
    }

    pub async fn summary(&self) -> Result<AccountSummary, SdkError> {
        Ok(AccountSummary::from_accounts(&self.list().await?))
    }

    /// Credit `amount` to an account. Returns the updated account.
    pub async fn top_up(&self, account_id: &AccountId, amount: Decimal) -> Result<Account, SdkError> {
        if account_id.as_str().is_empty() {
            return Err(ValidationError::MissingAccount.into());
        }
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount.into());
        }
        let path = format!("/accounts/{}/topup", urlencoding::encode(account_id.as_str()));
        let resp: AccountOut = self
            .client
            .http
            .post(&path, &TopUpRequest { amount })
            .await?;
        self.client.cache.invalidate(Mutation::TopUp).await;
        Ok(resp.into())
    }

    /// `GET /accounts/topups`.
    pub async fn top_ups(&self) -> Result<Vec<TopUp>, SdkError> {
        if let Some(top_ups) = self.client.cache.get(&QueryKey::TopUps).await {
            return Ok(top_ups);
        }
        let resp: TopUpListResponse = self
            .client
            .http
            .get("/accounts/topups", self.client.read_retry.clone())
            .await?;
        let top_ups: Vec<TopUp> = resp.data.into_iter().map(TopUp::from).collect();
        self.client
            .cache
            .insert(QueryKey::TopUps, top_ups.clone())
            .await;
        Ok(top_ups)
    }
}
