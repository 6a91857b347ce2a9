//! Transactions sub-client: history and idempotent creation.

use crate::cache::{Mutation, QueryKey};
use crate::client::WalletClient;
use crate::domain::transaction::wire::{TransactionCreate, TransactionListResponse, TransactionResponse};
use crate::domain::transaction::{NewTransaction, Transaction, TransactionFilter};
use crate::error::SdkError;

pub struct Transactions<'a> {
    pub(crate) client: &'a WalletClient,
}

impl<'a> Transactions<'a> {
    /// All transactions, newest first. Cached.
    pub async fn list(&self) -> Result<Vec<Transaction>, SdkError> {
        if let Some(txs) = self.client.cache.get(&QueryKey::Transactions).await {
            return Ok(txs);
        }
        let txs = self.fetch(&TransactionFilter::default()).await?;
        self.client
            .cache
            .insert(QueryKey::Transactions, txs.clone())
            .await;
        Ok(txs)
    }

    /// Filtered listing. Not cached unless the filter is empty.
    pub async fn search(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, SdkError> {
        if filter.is_empty() {
            return self.list().await;
        }
        self.fetch(filter).await
    }

    /// Record a transaction. Resubmitting the same `idem_key` returns the
    /// original record.
    pub async fn create(&self, new: NewTransaction) -> Result<Transaction, SdkError> {
        new.validate()?;
        let body = TransactionCreate::from(new);
        let resp: TransactionResponse = self.client.http.post("/transactions", &body).await?;
        self.client
            .cache
            .invalidate(Mutation::CreateTransaction)
            .await;
        Ok(resp.data.into())
    }

    async fn fetch(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, SdkError> {
        let path = format!("/transactions{}", filter.to_query());
        let resp: TransactionListResponse = self
            .client
            .http
            .get(&path, self.client.read_retry.clone())
            .await?;
        Ok(resp.data.into_iter().map(Transaction::from).collect())
    }
}
