//! PKCE (RFC 7636, S256) and the authorization request.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use url::Url;

use super::metadata::ProviderMetadata;
use crate::config::OidcSettings;
use crate::error::AuthError;

/// A PKCE verifier and its S256 challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pkce {
    pub verifier: String,
    pub challenge: String,
}

impl Pkce {
    /// Fresh verifier from 32 random bytes.
    pub fn generate() -> Self {
        let verifier = URL_SAFE_NO_PAD.encode(rand::random::<[u8; 32]>());
        let challenge = s256_challenge(&verifier);
        Self {
            verifier,
            challenge,
        }
    }
}

/// `BASE64URL(SHA256(verifier))`, unpadded.
pub fn s256_challenge(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}

pub fn random_state() -> String {
    URL_SAFE_NO_PAD.encode(rand::random::<[u8; 16]>())
}

/// An authorization request awaiting its callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationRequest {
    /// Where to send the user agent.
    pub url: Url,
    pub state: String,
    pub code_verifier: String,
    /// Path requested before sign-in, resolved after the callback.
    pub redirect_to: Option<String>,
}

impl AuthorizationRequest {
    pub fn new(
        metadata: &ProviderMetadata,
        settings: &OidcSettings,
        redirect_to: Option<String>,
    ) -> Result<Self, AuthError> {
        let pkce = Pkce::generate();
        let state = random_state();

        let mut url = Url::parse(&metadata.authorization_endpoint).map_err(|e| {
            AuthError::InvalidEndpoint(format!("{}: {e}", metadata.authorization_endpoint))
        })?;
        url.query_pairs_mut()
            .append_pair("client_id", &settings.client_id)
            .append_pair("redirect_uri", &settings.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", &settings.scope)
            .append_pair("state", &state)
            .append_pair("code_challenge", &pkce.challenge)
            .append_pair("code_challenge_method", "S256");

        Ok(Self {
            url,
            state,
            code_verifier: pkce.verifier,
            redirect_to,
        })
    }
}
