//! Provider metadata, derived from the issuer without a discovery request.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::AuthError;

/// OIDC endpoints of a Keycloak realm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMetadata {
    pub issuer: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub userinfo_endpoint: String,
    pub jwks_uri: String,
    pub revocation_endpoint: String,
    pub introspection_endpoint: String,
    pub end_session_endpoint: String,
}

impl ProviderMetadata {
    /// Endpoints under `{issuer}/protocol/openid-connect`. Trailing slashes on
    /// the issuer are ignored.
    pub fn from_issuer(issuer: &str) -> Self {
        let issuer = issuer.trim_end_matches('/').to_string();
        let base = format!("{}/protocol/openid-connect", issuer);
        Self {
            authorization_endpoint: format!("{}/auth", base),
            token_endpoint: format!("{}/token", base),
            userinfo_endpoint: format!("{}/userinfo", base),
            jwks_uri: format!("{}/certs", base),
            revocation_endpoint: format!("{}/revoke", base),
            introspection_endpoint: format!("{}/token/introspect", base),
            end_session_endpoint: format!("{}/logout", base),
            issuer,
        }
    }

    /// RP-initiated logout URL.
    pub fn end_session_url(
        &self,
        client_id: &str,
        id_token_hint: Option<&str>,
        post_logout_redirect_uri: &str,
    ) -> Result<Url, AuthError> {
        let mut url = Url::parse(&self.end_session_endpoint)
            .map_err(|e| AuthError::InvalidEndpoint(format!("{}: {e}", self.end_session_endpoint)))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("client_id", client_id);
            if let Some(hint) = id_token_hint {
                query.append_pair("id_token_hint", hint);
            }
            query.append_pair("post_logout_redirect_uri", post_logout_redirect_uri);
        }
        Ok(url)
    }
}
