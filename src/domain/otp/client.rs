//! OTP sub-client: send and verify codes, resume the parked action.

use crate::client::{ProtectedOutcome, WalletClient};
use crate::domain::otp::wire::{OtpSendRequest, OtpSendResponse, OtpVerifyResponse};
use crate::domain::otp::{verification_request, OtpChallenge, OtpVerification, DEFAULT_OTP_CONTEXT};
use crate::error::SdkError;
use crate::shared::ChallengeId;

/// Outcome of a successful verification.
#[derive(Debug)]
pub struct OtpVerified {
    pub verification: OtpVerification,
    /// Result of the action that was waiting for this verification, if any.
    /// It has run exactly once.
    pub resumed: Option<Result<ProtectedOutcome, SdkError>>,
}

pub struct Otp<'a> {
    pub(crate) client: &'a WalletClient,
}

impl<'a> Otp<'a> {
    /// `POST /otp/send` on the user's preferred channel.
    pub async fn request(&self) -> Result<OtpChallenge, SdkError> {
        self.send(&OtpSendRequest::default()).await
    }

    /// `POST /otp/send` with explicit options.
    pub async fn send(&self, request: &OtpSendRequest) -> Result<OtpChallenge, SdkError> {
        let mut body = request.clone();
        if body.context.as_deref().map_or(true, |c| c.trim().is_empty()) {
            body.context = Some(DEFAULT_OTP_CONTEXT.to_string());
        }
        let resp: OtpSendResponse = self.client.http.post("/otp/send", &body).await?;
        let challenge = OtpChallenge::from(resp);
        tracing::debug!(
            challenge_id = %challenge.challenge_id,
            channel = %challenge.channel_code,
            "OTP sent"
        );
        Ok(challenge)
    }

    /// Verify a code, store the new MFA session expiry and run the pending
    /// action.
    ///
    /// A rejected code leaves the pending action parked.
    pub async fn verify(
        &self,
        challenge_id: Option<&ChallengeId>,
        code: &str,
    ) -> Result<OtpVerified, SdkError> {
        let body = verification_request(challenge_id, code)?;
        let resp: OtpVerifyResponse = self.client.http.post("/otp/verify", &body).await?;
        let verification = OtpVerification::from(resp);
        let resumed = self
            .client
            .otp_guard
            .resume(&self.client.mfa, verification.expires_at)
            .await?;
        if let Some(Err(e)) = &resumed {
            tracing::warn!(error = %e, "Resumed action failed");
        }
        Ok(OtpVerified {
            verification,
            resumed,
        })
    }

    /// Close the prompt: the pending action is dropped without running.
    pub fn dismiss(&self) {
        self.client.otp_guard.dismiss();
    }

    pub fn has_pending(&self) -> bool {
        self.client.otp_guard.has_pending()
    }

    /// Whether the locally stored MFA session is still open.
    pub fn session_valid(&self) -> bool {
        self.client.mfa.is_still_valid()
    }
}
