//! Payouts sub-client: withdrawal methods and withdrawals.

use crate::cache::{Mutation, QueryKey};
use crate::client::{ProtectedOutcome, WalletClient};
use crate::domain::payout::wire::{
    WithdrawalMethodCreate, WithdrawalMethodOut, WithdrawalOut, WithdrawalRequest,
};
use crate::domain::payout::{Withdrawal, WithdrawalDraft, WithdrawalMethod, WithdrawalMethodDraft};
use crate::error::SdkError;
use crate::mfa::{pending, GuardOutcome};
use crate::shared::WithdrawalMethodId;

const METHODS_PATH: &str = "/payouts/withdrawal-methods";
const WITHDRAWALS_PATH: &str = "/payouts/withdrawals";

pub struct Payouts<'a> {
    pub(crate) client: &'a WalletClient,
}

impl<'a> Payouts<'a> {
    /// `GET /payouts/withdrawal-methods`. Cached.
    pub async fn methods(&self) -> Result<Vec<WithdrawalMethod>, SdkError> {
        if let Some(methods) = self.client.cache.get(&QueryKey::WithdrawalMethods).await {
            return Ok(methods);
        }
        let resp: Vec<WithdrawalMethodOut> = self
            .client
            .http
            .get(METHODS_PATH, self.client.read_retry.clone())
            .await?;
        let methods: Vec<WithdrawalMethod> =
            resp.into_iter().map(WithdrawalMethod::from).collect();
        self.client
            .cache
            .insert(QueryKey::WithdrawalMethods, methods.clone())
            .await;
        Ok(methods)
    }

    /// Save a bank account. Needs a fresh MFA session.
    ///
    /// Returns [`GuardOutcome::Deferred`] when an OTP must be verified first;
    /// the request is then sent by [`Otp::verify`](crate::domain::otp::client::Otp::verify).
    pub async fn create_method(
        &self,
        draft: &WithdrawalMethodDraft,
    ) -> Result<GuardOutcome<WithdrawalMethod>, SdkError> {
        let body = draft.validate()?;
        let client = self.client.clone();
        let action = pending(move || async move {
            client
                .payouts()
                .send_create_method(&body)
                .await
                .map(ProtectedOutcome::WithdrawalMethod)
        });
        self.client
            .run_protected(action, ProtectedOutcome::into_withdrawal_method)
            .await
    }

    /// `DELETE /payouts/withdrawal-methods/{id}`.
    pub async fn delete_method(&self, method_id: &WithdrawalMethodId) -> Result<(), SdkError> {
        let path = format!("{}/{}", METHODS_PATH, urlencoding::encode(method_id.as_str()));
        self.client.http.delete_empty(&path, None::<&()>).await?;
        tracing::info!(method_id = %method_id, "Withdrawal method deleted");
        self.client
            .cache
            .invalidate(Mutation::DeleteWithdrawalMethod)
            .await;
        Ok(())
    }

    /// Validate against current balances, then request the withdrawal.
    /// Needs a fresh MFA session.
    pub async fn request_withdrawal(
        &self,
        draft: &WithdrawalDraft,
    ) -> Result<GuardOutcome<Withdrawal>, SdkError> {
        let accounts = self.client.accounts().list().await?;
        let body = draft.validate(&accounts)?;
        let client = self.client.clone();
        let action = pending(move || async move {
            client
                .payouts()
                .send_withdrawal(&body)
                .await
                .map(ProtectedOutcome::Withdrawal)
        });
        self.client
            .run_protected(action, ProtectedOutcome::into_withdrawal)
            .await
    }

    /// `GET /payouts/withdrawals`, newest first. Cached.
    pub async fn withdrawals(&self) -> Result<Vec<Withdrawal>, SdkError> {
        if let Some(withdrawals) = self.client.cache.get(&QueryKey::Withdrawals).await {
            return Ok(withdrawals);
        }
        let resp: Vec<WithdrawalOut> = self
            .client
            .http
            .get(WITHDRAWALS_PATH, self.client.read_retry.clone())
            .await?;
        let withdrawals: Vec<Withdrawal> = resp.into_iter().map(Withdrawal::from).collect();
        self.client
            .cache
            .insert(QueryKey::Withdrawals, withdrawals.clone())
            .await;
        Ok(withdrawals)
    }

    async fn send_create_method(
        &self,
        body: &WithdrawalMethodCreate,
    ) -> Result<WithdrawalMethod, SdkError> {
        let resp: WithdrawalMethodOut = self.client.http.post(METHODS_PATH, body).await?;
        self.client
            .cache
            .invalidate(Mutation::CreateWithdrawalMethod)
            .await;
        Ok(resp.into())
    }

    async fn send_withdrawal(&self, body: &WithdrawalRequest) -> Result<Withdrawal, SdkError> {
        let resp: WithdrawalOut = self.client.http.post(WITHDRAWALS_PATH, body).await?;
        let withdrawal = Withdrawal::from(resp);
        tracing::info!(reference = %withdrawal.reference, "Withdrawal requested");
        self.client
            .cache
            .invalidate(Mutation::RequestWithdrawal)
            .await;
        Ok(withdrawal)
    }
}
