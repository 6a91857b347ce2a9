use super::wire::{OtpSendResponse, OtpVerifyResponse};
use super::{OtpChallenge, OtpVerification};
use crate::shared::serde_util::timestamp_or_epoch;

impl From<OtpSendResponse> for OtpChallenge {
    fn from(r: OtpSendResponse) -> Self {
        Self {
            challenge_id: r.challenge_id,
            channel_code: r.channel_code,
            expires_at: timestamp_or_epoch(r.expires_at.as_deref().unwrap_or_default()),
            status: r.status,
        }
    }
}

impl From<OtpVerifyResponse> for OtpVerification {
    fn from(r: OtpVerifyResponse) -> Self {
        Self {
            status: r.status,
            verified_at: timestamp_or_epoch(r.verified_at.as_deref().unwrap_or_default()),
            expires_at: timestamp_or_epoch(r.expires_at.as_deref().unwrap_or_default()),
        }
    }
}
