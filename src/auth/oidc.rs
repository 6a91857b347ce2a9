//! OIDC client: token, userinfo and revocation endpoints.

use chrono::Utc;
use reqwest::Client;
use serde::de::DeserializeOwned;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use url::Url;

use super::metadata::ProviderMetadata;
use super::pkce::AuthorizationRequest;
use super::{ProviderErrorBody, TokenResponse, TokenSet, UserInfo};
use crate::config::OidcSettings;
use crate::error::{AuthError, HttpError, SdkError};
use crate::http::normalize_api_error;

/// Talks to the identity provider for one OIDC client registration.
#[derive(Clone)]
pub struct OidcClient {
    http: Client,
    metadata: ProviderMetadata,
    settings: OidcSettings,
}

impl std::fmt::Debug for OidcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OidcClient")
            .field("issuer", &self.metadata.issuer)
            .field("client_id", &self.settings.client_id)
            .finish()
    }
}

impl OidcClient {
    pub fn new(settings: OidcSettings) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(Duration::from_secs(30));
        }
        Ok(Self {
            http: builder.build()?,
            metadata: ProviderMetadata::from_issuer(&settings.issuer),
            settings,
        })
    }

    pub fn metadata(&self) -> &ProviderMetadata {
        &self.metadata
    }

    pub fn settings(&self) -> &OidcSettings {
        &self.settings
    }

    pub fn authorization_request(
        &self,
        redirect_to: Option<String>,
    ) -> Result<AuthorizationRequest, AuthError> {
        AuthorizationRequest::new(&self.metadata, &self.settings, redirect_to)
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(
        &self,
        code: &str,
        code_verifier: &str,
    ) -> Result<TokenSet, SdkError> {
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
            ("client_id", self.settings.client_id.as_str()),
            ("code_verifier", code_verifier),
        ];
        let response: TokenResponse = self.post_form(&self.metadata.token_endpoint, &form).await?;
        Ok(TokenSet::from_response(response, Utc::now(), None))
    }

    /// Refresh-token exchange ("silent renew").
    pub async fn refresh(&self, current: &TokenSet) -> Result<TokenSet, SdkError> {
        let refresh_token = current
            .refresh_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingRefreshToken)?;
        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.settings.client_id.as_str()),
        ];
        let response: TokenResponse = self.post_form(&self.metadata.token_endpoint, &form).await?;
        Ok(TokenSet::from_response(response, Utc::now(), Some(current)))
    }

    pub async fn userinfo(&self, access_token: &str) -> Result<UserInfo, SdkError> {
        let resp = self
            .http
            .get(&self.metadata.userinfo_endpoint)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(HttpError::from)?;
        read_json(resp).await
    }

    /// Revoke a token (RFC 7009).
    pub async fn revoke(&self, token: &str, token_type_hint: &str) -> Result<(), SdkError> {
        let form = [
            ("token", token),
            ("token_type_hint", token_type_hint),
            ("client_id", self.settings.client_id.as_str()),
        ];
        let resp = self
            .http
            .post(&self.metadata.revocation_endpoint)
            .form(&form)
            .send()
            .await
            .map_err(HttpError::from)?;
        if resp.status().is_success() {
            return Ok(());
        }
        Err(error_from_response(resp).await)
    }

    pub fn end_session_url(&self, id_token_hint: Option<&str>) -> Result<Url, AuthError> {
        self.metadata.end_session_url(
            &self.settings.client_id,
            id_token_hint,
            &self.settings.post_logout_redirect_uri,
        )
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: &[(&str, &str)],
    ) -> Result<T, SdkError> {
        tracing::debug!(endpoint, grant_type = form[0].1, "Token request");
        let resp = self
            .http
            .post(endpoint)
            .form(form)
            .send()
            .await
            .map_err(HttpError::from)?;
        read_json(resp).await
    }
}

async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, SdkError> {
    if !resp.status().is_success() {
        return Err(error_from_response(resp).await);
    }
    let bytes = resp.bytes().await.map_err(HttpError::from)?;
    Ok(serde_json::from_slice(&bytes).map_err(HttpError::from)?)
}

/// `{error, error_description}` bodies become [`AuthError::Provider`]; any
/// other body is normalized like an API error.
async fn error_from_response(resp: reqwest::Response) -> SdkError {
    let status = resp.status().as_u16();
    let body = match resp.text().await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(status, "Failed to read identity provider error body: {}", e);
            String::new()
        }
    };
    match serde_json::from_str::<ProviderErrorBody>(&body) {
        Ok(provider) => AuthError::from(provider).into(),
        Err(_) => normalize_api_error(status, &body).into(),
    }
}
