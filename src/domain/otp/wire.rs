//! Wire types for `/otp`.

use crate::shared::ChallengeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Body of `POST /otp/send`. Every field is optional; the server falls back
/// to the user's preferred channel and e-mail address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OtpSendRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl OtpSendRequest {
    pub fn channel(mut self, code: impl Into<String>) -> Self {
        self.channel_code = Some(code.into());
        self
    }

    pub fn destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpSendResponse {
    #[serde(default)]
    pub status: String,
    pub challenge_id: ChallengeId,
    #[serde(default)]
    pub channel_code: String,
    #[serde(default)]
    pub expires_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtpVerifyRequest {
    pub challenge_id: ChallengeId,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpVerifyResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub verified_at: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
}
