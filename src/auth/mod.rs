//! Authentication: OpenID Connect authorization code flow with PKCE.
//!
//! ## Flow
//!
//! 1. `client.auth().begin_sign_in(redirect_to)` builds the authorization URL
//!    and remembers the PKCE verifier and `state`.
//! 2. The identity provider redirects back to the callback URI; pass that URL
//!    to `client.auth().complete_sign_in(..)`, which exchanges the code for a
//!    [`TokenSet`] and returns the post-login path.
//! 3. Every API request asks the session for an access token. An expired token
//!    is renewed silently with the refresh token; failures are logged and the
//!    request goes out unauthenticated.
//! 4. `client.auth().sign_out()` revokes tokens best-effort, clears local state
//!    and returns the end-session URL.
//!
//! Claims are decoded from the JWT payload without signature verification;
//! the API validates tokens server-side.

#[cfg(feature = "http")]
pub mod client;
pub mod metadata;
#[cfg(feature = "http")]
pub mod oidc;
pub mod pkce;
pub mod redirect;
#[cfg(feature = "http")]
pub mod session;

pub use metadata::ProviderMetadata;
pub use pkce::{AuthorizationRequest, Pkce};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Tokens are renewed this long before they actually expire.
pub const EXPIRY_SKEW_SECS: i64 = 30;

// ============================================================================
// Token set
// ============================================================================

/// Tokens issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    pub token_type: String,
    pub refresh_token: Option<String>,
    pub id_token: Option<String>,
    /// Space-separated granted scopes.
    pub scope: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Error body of the token and revocation endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderErrorBody {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl From<ProviderErrorBody> for AuthError {
    fn from(body: ProviderErrorBody) -> Self {
        AuthError::Provider {
            error: body.error,
            description: body.error_description,
        }
    }
}

impl TokenSet {
    /// Build a token set from a token endpoint response received at `now`.
    ///
    /// On refresh the provider may omit the refresh token, the ID token or the
    /// scope; the values of `previous` are kept for those.
    pub fn from_response(
        response: TokenResponse,
        now: DateTime<Utc>,
        previous: Option<&TokenSet>,
    ) -> Self {
        Self {
            expires_at: response.expires_in.map(|secs| now + Duration::seconds(secs)),
            refresh_token: response
                .refresh_token
                .or_else(|| previous.and_then(|p| p.refresh_token.clone())),
            id_token: response
                .id_token
                .or_else(|| previous.and_then(|p| p.id_token.clone())),
            scope: response
                .scope
                .or_else(|| previous.and_then(|p| p.scope.clone())),
            access_token: response.access_token,
            token_type: response.token_type,
        }
    }

    /// Expired, or about to expire within [`EXPIRY_SKEW_SECS`].
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at
            .is_some_and(|exp| exp <= now + Duration::seconds(EXPIRY_SKEW_SECS))
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn can_refresh(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Granted scopes, from the token response or else from the access token.
    pub fn scopes(&self) -> Vec<String> {
        let raw = match &self.scope {
            Some(scope) => Some(scope.clone()),
            None => self.claims().ok().and_then(|c| c.scope),
        };
        raw.map(|s| s.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn has_scopes(&self, required: &[&str]) -> bool {
        let granted = self.scopes();
        required.iter().all(|r| granted.iter().any(|g| g == r))
    }

    pub fn claims(&self) -> Result<AccessClaims, AuthError> {
        decode_jwt_claims(&self.access_token)
    }
}

// ============================================================================
// Claims
// ============================================================================

/// Claims carried by the access token (or the ID token).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessClaims {
    pub sub: Option<String>,
    pub iss: Option<String>,
    pub azp: Option<String>,
    pub exp: Option<i64>,
    pub scope: Option<String>,
    pub preferred_username: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
}

impl AccessClaims {
    pub fn scopes(&self) -> Vec<&str> {
        self.scope
            .as_deref()
            .map(|s| s.split_whitespace().collect())
            .unwrap_or_default()
    }
}

/// Decode a JWT payload without verifying its signature.
pub fn decode_jwt_claims(token: &str) -> Result<AccessClaims, AuthError> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AuthError::InvalidToken("not a JWT".to_string()))?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| AuthError::InvalidToken(format!("payload is not base64url: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| AuthError::InvalidToken(format!("payload is not JSON: {e}")))
}

// ============================================================================
// User profile
// ============================================================================

/// Profile claims of the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInfo {
    pub sub: String,
    pub preferred_username: Option<String>,
    pub name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub email: Option<String>,
    pub email_verified: Option<bool>,
}

impl UserInfo {
    /// Name shown in the UI header.
    pub fn display_name(&self) -> &str {
        self.preferred_username
            .as_deref()
            .or(self.name.as_deref())
            .or(self.given_name.as_deref())
            .or(self.email.as_deref())
            .unwrap_or("User")
    }

    /// Default account holder name for a new withdrawal method.
    pub fn holder_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.preferred_username.as_deref())
            .or(self.email.as_deref())
            .unwrap_or("User")
    }
}

impl From<AccessClaims> for UserInfo {
    fn from(c: AccessClaims) -> Self {
        Self {
            sub: c.sub.unwrap_or_default(),
            preferred_username: c.preferred_username,
            name: c.name,
            given_name: c.given_name,
            family_name: c.family_name,
            email: c.email,
            email_verified: None,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Unsigned JWT with the given JSON payload.
    pub(crate) fn jwt(payload: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{header}.{body}.sig")
    }

    fn response(access_token: String) -> TokenResponse {
        TokenResponse {
            access_token,
            token_type: "Bearer".into(),
            expires_in: Some(300),
            refresh_token: None,
            id_token: None,
            scope: None,
        }
    }

    #[test]
    fn decodes_claims_and_scopes() {
        let token = jwt(serde_json::json!({
            "sub": "user-1",
            "scope": "openid profile email thesis-access",
            "preferred_username": "mrossi",
            "email": "m.rossi@example.com"
        }));
        let claims = decode_jwt_claims(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("user-1"));
        assert_eq!(claims.scopes(), vec!["openid", "profile", "email", "thesis-access"]);
    }

    #[test]
    fn rejects_non_jwt() {
        assert!(matches!(decode_jwt_claims("opaque"), Err(AuthError::InvalidToken(_))));
        assert!(matches!(decode_jwt_claims("a.%%%.c"), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn scopes_fall_back_to_access_token_claims() {
        let token = jwt(serde_json::json!({"scope": "openid thesis-access"}));
        let set = TokenSet::from_response(response(token), Utc::now(), None);
        assert!(set.has_scopes(&["openid", "thesis-access"]));
        assert!(!set.has_scopes(&["admin"]));
    }

    #[test]
    fn refresh_keeps_previous_values_when_omitted() {
        let now = Utc::now();
        let first = TokenSet::from_response(
            TokenResponse {
                refresh_token: Some("r1".into()),
                id_token: Some("id1".into()),
                scope: Some("openid profile".into()),
                ..response("a1".into())
            },
            now,
            None,
        );
        let second = TokenSet::from_response(response("a2".into()), now, Some(&first));
        assert_eq!(second.access_token, "a2");
        assert_eq!(second.refresh_token.as_deref(), Some("r1"));
        assert_eq!(second.id_token.as_deref(), Some("id1"));
        assert_eq!(second.scopes(), first.scopes());
    }

    #[test]
    fn expiry_includes_skew() {
        let now = Utc::now();
        let set = TokenSet::from_response(response("a".into()), now, None);
        assert!(!set.is_expired_at(now));
        assert!(set.is_expired_at(now + Duration::seconds(300 - EXPIRY_SKEW_SECS)));
        let no_expiry = TokenSet {
            expires_at: None,
            ..set
        };
        assert!(!no_expiry.is_expired_at(now + Duration::days(365)));
    }

    #[test]
    fn display_and_holder_name_fallbacks() {
        let mut user = UserInfo {
            name: Some("Mario Rossi".into()),
            email: Some("m@example.com".into()),
            ..UserInfo::default()
        };
        assert_eq!(user.display_name(), "Mario Rossi");
        assert_eq!(user.holder_name(), "Mario Rossi");

        user.preferred_username = Some("mrossi".into());
        assert_eq!(user.display_name(), "mrossi");
        assert_eq!(user.holder_name(), "Mario Rossi");

        assert_eq!(UserInfo::default().display_name(), "User");
    }
}
