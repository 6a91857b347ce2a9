//! Profile sub-client.

use crate::client::{ProtectedOutcome, WalletClient};
use crate::domain::profile::wire::{PasswordChangeRequest, ProfileDeleteRequest};
use crate::domain::profile::{PasswordChange, ProfileDraft, ProfileUpdate};
use crate::error::SdkError;
use crate::mfa::{pending, GuardOutcome};

pub struct Profile<'a> {
    pub(crate) client: &'a WalletClient,
}

impl<'a> Profile<'a> {
    /// Send the fields of `draft` that differ from the signed-in user.
    ///
    /// Guarded by OTP only when the e-mail changes; otherwise any parked
    /// action is dropped and the update is sent right away.
    pub async fn update(&self, draft: &ProfileDraft) -> Result<GuardOutcome<()>, SdkError> {
        let current = self.client.session.user().await?;
        let update = draft.diff(&current)?;
        if !update.requires_mfa() {
            self.client.otp_guard.dismiss();
            self.send_update(&update).await?;
            return Ok(GuardOutcome::Ready(()));
        }
        let client = self.client.clone();
        let action = pending(move || async move {
            client
                .profile()
                .send_update(&update)
                .await
                .map(|()| ProtectedOutcome::ProfileUpdated)
        });
        self.client
            .run_protected(action, ProtectedOutcome::into_profile_updated)
            .await
    }

    /// `POST /profile/password`. Needs a fresh MFA session.
    pub async fn change_password(
        &self,
        change: &PasswordChange,
    ) -> Result<GuardOutcome<()>, SdkError> {
        let body = change.validate()?;
        let client = self.client.clone();
        let action = pending(move || async move {
            client
                .profile()
                .send_password(&body)
                .await
                .map(|()| ProtectedOutcome::PasswordChanged)
        });
        self.client
            .run_protected(action, ProtectedOutcome::into_password_changed)
            .await
    }

    /// `DELETE /profile`, confirmed with the current password.
    ///
    /// The local session is not touched; callers sign out afterwards.
    pub async fn delete(&self, password: &str) -> Result<(), SdkError> {
        let body = ProfileDeleteRequest {
            password: password.to_string(),
        };
        self.client.http.delete_empty("/profile", Some(&body)).await?;
        tracing::info!("Profile deleted");
        Ok(())
    }

    async fn send_update(&self, update: &ProfileUpdate) -> Result<(), SdkError> {
        self.client.http.put_empty("/profile", update).await?;
        // Refresh the identity on next access.
        self.client.session.clear_user().await;
        Ok(())
    }

    async fn send_password(&self, body: &PasswordChangeRequest) -> Result<(), SdkError> {
        self.client.http.post_empty("/profile/password", body).await?;
        Ok(())
    }
}
