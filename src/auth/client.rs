//! Auth sub-client: sign-in, tokens, profile and sign-out.

use url::Url;

use crate::auth::pkce::AuthorizationRequest;
use crate::auth::redirect::{is_logout_callback, resolve_redirect_path};
use crate::auth::{TokenSet, UserInfo};
use crate::client::WalletClient;
use crate::error::SdkError;

/// Sub-client for the OIDC session.
pub struct Auth<'a> {
    pub(crate) client: &'a WalletClient,
}

impl<'a> Auth<'a> {
    /// Build the authorization URL to send the user to.
    ///
    /// `redirect_to` is where to land after sign-in; it is checked again on
    /// completion.
    pub async fn begin_sign_in(
        &self,
        redirect_to: Option<&str>,
    ) -> Result<AuthorizationRequest, SdkError> {
        let request = self
            .client
            .session
            .begin(redirect_to.map(str::to_string))
            .await?;
        tracing::debug!(url = %request.url, "Sign-in started");
        Ok(request)
    }

    /// Handle the provider callback URL. Returns the app path to go to next.
    pub async fn complete_sign_in(&self, callback_url: &str) -> Result<String, SdkError> {
        let (_, redirect_to) = self.client.session.complete(callback_url).await?;
        self.client.cache.clear().await;
        Ok(resolve_redirect_path(
            redirect_to.as_deref(),
            &self.client.config,
        ))
    }

    /// Current access token, silently renewed when expired. `None` when
    /// signed out or when renewal fails.
    pub async fn access_token(&self) -> Option<String> {
        match self.client.session.valid_access_token().await {
            Ok(token) => Some(token),
            Err(SdkError::Auth(crate::error::AuthError::NotAuthenticated)) => None,
            Err(e) => {
                tracing::warn!("Could not obtain an access token: {}", e);
                None
            }
        }
    }

    pub async fn tokens(&self) -> Option<TokenSet> {
        self.client.session.tokens().await
    }

    /// Install (or drop) a token set obtained elsewhere.
    pub async fn set_tokens(&self, tokens: Option<TokenSet>) {
        self.client.session.set_tokens(tokens).await;
    }

    /// Refresh now.
    pub async fn renew(&self) -> Result<TokenSet, SdkError> {
        self.client.session.renew().await
    }

    pub async fn user(&self) -> Result<UserInfo, SdkError> {
        self.client.session.user().await
    }

    pub async fn is_authenticated(&self) -> bool {
        self.access_token().await.is_some()
    }

    /// Whether the current token grants every scope in `required`.
    pub async fn has_scopes(&self, required: &[&str]) -> bool {
        self.tokens()
            .await
            .is_some_and(|t| t.has_scopes(required))
    }

    /// End the session: revoke tokens best-effort, drop cached data and the
    /// pending OTP action. Returns the provider's end-session URL.
    ///
    /// The stored MFA expiry is left alone; it simply lapses.
    pub async fn sign_out(&self) -> Result<Url, SdkError> {
        let url = self.client.session.sign_out().await?;
        self.client.cache.clear().await;
        self.client.otp_guard.dismiss();
        tracing::debug!("Signed out");
        Ok(url)
    }

    /// Whether `current_url` is the post-logout landing page.
    pub fn is_logout_callback(&self, current_url: &str) -> bool {
        is_logout_callback(current_url, &self.client.config)
    }

    pub fn is_mocked(&self) -> bool {
        self.client.config.feature_flags.enable_mocked_auth
    }
}
