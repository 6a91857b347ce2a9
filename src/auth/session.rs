//! Signed-in session state and silent renew.

use async_lock::RwLock;
use async_trait::async_trait;
use chrono::Utc;
use url::Url;

use super::oidc::OidcClient;
use super::pkce::AuthorizationRequest;
use super::{TokenSet, UserInfo};
use crate::error::{AuthError, SdkError};
use crate::http::AccessTokenSource;

/// Token set, pending sign-in and cached profile for one user agent.
#[derive(Debug)]
pub struct OidcSession {
    oidc: OidcClient,
    tokens: RwLock<Option<TokenSet>>,
    pending: RwLock<Option<AuthorizationRequest>>,
    user: RwLock<Option<UserInfo>>,
}

impl OidcSession {
    pub fn new(oidc: OidcClient) -> Self {
        Self {
            oidc,
            tokens: RwLock::new(None),
            pending: RwLock::new(None),
            user: RwLock::new(None),
        }
    }

    pub fn oidc(&self) -> &OidcClient {
        &self.oidc
    }

    /// Start a sign-in. Replaces any sign-in already in progress.
    pub async fn begin(&self, redirect_to: Option<String>) -> Result<AuthorizationRequest, AuthError> {
        let request = self.oidc.authorization_request(redirect_to)?;
        *self.pending.write().await = Some(request.clone());
        Ok(request)
    }

    /// Finish the sign-in from the callback URL.
    ///
    /// Returns the tokens and the `redirect_to` remembered by [`begin`](Self::begin).
    pub async fn complete(&self, callback_url: &str) -> Result<(TokenSet, Option<String>), SdkError> {
        let callback = Url::parse(callback_url)
            .map_err(|e| AuthError::InvalidEndpoint(format!("{callback_url}: {e}")))?;
        let mut code = None;
        let mut state = None;
        let mut error = None;
        let mut description = None;
        for (key, value) in callback.query_pairs() {
            match key.as_ref() {
                "code" => code = Some(value.into_owned()),
                "state" => state = Some(value.into_owned()),
                "error" => error = Some(value.into_owned()),
                "error_description" => description = Some(value.into_owned()),
                _ => {}
            }
        }

        let pending = self.pending.write().await.take().ok_or(AuthError::NoPendingSignIn)?;
        if let Some(error) = error {
            return Err(AuthError::Provider { error, description }.into());
        }
        if state.as_deref() != Some(pending.state.as_str()) {
            return Err(AuthError::StateMismatch.into());
        }
        let code = code.filter(|c| !c.is_empty()).ok_or(AuthError::MissingCode)?;

        let tokens = self.oidc.exchange_code(&code, &pending.code_verifier).await?;
        self.set_tokens(Some(tokens.clone())).await;
        tracing::debug!("Signed in");
        Ok((tokens, pending.redirect_to))
    }

    pub async fn tokens(&self) -> Option<TokenSet> {
        self.tokens.read().await.clone()
    }

    /// Replace the token set. The cached profile is dropped.
    pub async fn set_tokens(&self, tokens: Option<TokenSet>) {
        *self.tokens.write().await = tokens;
        *self.user.write().await = None;
    }

    /// Refresh now, regardless of expiry. The cached profile is dropped.
    pub async fn renew(&self) -> Result<TokenSet, SdkError> {
        let mut guard = self.tokens.write().await;
        let current = guard.as_ref().ok_or(AuthError::NotAuthenticated)?;
        let renewed = self.oidc.refresh(current).await?;
        *guard = Some(renewed.clone());
        drop(guard);
        *self.user.write().await = None;
        Ok(renewed)
    }

    /// A usable access token, renewing silently when it has expired.
    pub async fn valid_access_token(&self) -> Result<String, SdkError> {
        {
            let tokens = self.tokens.read().await;
            match tokens.as_ref() {
                None => return Err(AuthError::NotAuthenticated.into()),
                Some(t) if !t.is_expired() => return Ok(t.access_token.clone()),
                Some(_) => {}
            }
        }

        let mut guard = self.tokens.write().await;
        let current = guard.as_ref().ok_or(AuthError::NotAuthenticated)?;
        // Another caller may have renewed while we waited for the lock.
        if !current.is_expired_at(Utc::now()) {
            return Ok(current.access_token.clone());
        }
        if !current.can_refresh() {
            return Err(AuthError::TokenExpired.into());
        }
        let renewed = self.oidc.refresh(current).await?;
        let token = renewed.access_token.clone();
        *guard = Some(renewed);
        drop(guard);
        *self.user.write().await = None;
        tracing::debug!("Silent renew succeeded");
        Ok(token)
    }

    /// Profile from the userinfo endpoint, falling back to token claims.
    pub async fn user(&self) -> Result<UserInfo, SdkError> {
        if let Some(user) = self.user.read().await.clone() {
            return Ok(user);
        }
        let token = self.valid_access_token().await?;
        let user = match self.oidc.userinfo(&token).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Userinfo request failed, using token claims: {}", e);
                let tokens = self.tokens().await.ok_or(AuthError::NotAuthenticated)?;
                let claims = match tokens.id_token.as_deref() {
                    Some(id_token) => super::decode_jwt_claims(id_token)?,
                    None => tokens.claims()?,
                };
                UserInfo::from(claims)
            }
        };
        *self.user.write().await = Some(user.clone());
        Ok(user)
    }

    /// Forget the cached profile so the next [`user`](Self::user) refetches it.
    pub async fn clear_user(&self) {
        *self.user.write().await = None;
    }

    /// Revoke tokens best-effort, clear local state and return the end-session URL.
    pub async fn sign_out(&self) -> Result<Url, AuthError> {
        let tokens = self.tokens.write().await.take();
        *self.user.write().await = None;
        *self.pending.write().await = None;

        let id_token = tokens.as_ref().and_then(|t| t.id_token.clone());
        if let Some(tokens) = tokens {
            if let Some(refresh) = tokens.refresh_token.as_deref() {
                if let Err(e) = self.oidc.revoke(refresh, "refresh_token").await {
                    tracing::warn!("Refresh token revocation failed: {}", e);
                }
            }
            if let Err(e) = self.oidc.revoke(&tokens.access_token, "access_token").await {
                tracing::warn!("Access token revocation failed: {}", e);
            }
        }
        self.oidc.end_session_url(id_token.as_deref())
    }
}

#[async_trait]
impl AccessTokenSource for OidcSession {
    async fn access_token(&self) -> Option<String> {
        match self.valid_access_token().await {
            Ok(token) => Some(token),
            Err(SdkError::Auth(AuthError::NotAuthenticated)) => None,
            Err(e) => {
                tracing::warn!("Silent renew failed: {}", e);
                None
            }
        }
    }
}
