//! OTP domain: one-time code challenges that open an MFA session.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::error::ValidationError;
use crate::shared::ChallengeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Context sent with every challenge unless the caller picks another one.
pub const DEFAULT_OTP_CONTEXT: &str = "default";

/// A code that was just sent to the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OtpChallenge {
    pub challenge_id: ChallengeId,
    /// Channel the code went out on, e.g. `EMAIL` or `SMS`.
    pub channel_code: String,
    /// When the code itself stops being accepted.
    pub expires_at: DateTime<Utc>,
    pub status: String,
}

impl OtpChallenge {
    pub fn is_email(&self) -> bool {
        self.channel_code.eq_ignore_ascii_case("EMAIL")
    }
}

/// A successful verification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OtpVerification {
    pub status: String,
    pub verified_at: DateTime<Utc>,
    /// End of the MFA session opened by this verification.
    pub expires_at: DateTime<Utc>,
}

/// Check a verification attempt before sending it. The code is trimmed.
pub fn verification_request(
    challenge_id: Option<&ChallengeId>,
    code: &str,
) -> Result<wire::OtpVerifyRequest, ValidationError> {
    let challenge_id = challenge_id
        .filter(|id| !id.as_str().is_empty())
        .ok_or(ValidationError::MissingOtpChallenge)?;
    let code = code.trim();
    if code.is_empty() {
        return Err(ValidationError::MissingOtpCode);
    }
    Ok(wire::OtpVerifyRequest {
        challenge_id: challenge_id.clone(),
        code: code.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_needs_challenge_and_code() {
        assert_eq!(
            verification_request(None, "123456"),
            Err(ValidationError::MissingOtpChallenge)
        );
        let id = ChallengeId::from("c-1");
        assert_eq!(
            verification_request(Some(&id), "   "),
            Err(ValidationError::MissingOtpCode)
        );
        let req = verification_request(Some(&id), " 123456\n").unwrap();
        assert_eq!(req.code, "123456");
        assert_eq!(req.challenge_id, id);
    }
}
