//! Application configuration loaded from environment variables.
//!
//! Variables use the `WALLET_` prefix (e.g. `WALLET_API_BASE_URL`). A `.env`
//! file is read first when present. Empty values fall back to the defaults.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;
use crate::network::{
    DEFAULT_API_URL, DEFAULT_APP_NAME, DEFAULT_APP_ORIGIN, DEFAULT_OIDC_CLIENT_ID,
    DEFAULT_OIDC_ISSUER, DEFAULT_OIDC_SCOPE,
};

/// Environment prefix for all variables.
pub const ENV_PREFIX: &str = "WALLET_";

/// Raw environment, before defaults are applied.
#[derive(Debug, Clone, Default, Deserialize)]
struct EnvConfig {
    #[serde(default)]
    app_name: Option<String>,
    #[serde(default)]
    app_version: Option<String>,
    #[serde(default)]
    app_origin: Option<String>,
    #[serde(default)]
    api_base_url: Option<String>,
    #[serde(default)]
    oidc_issuer: Option<String>,
    #[serde(default)]
    oidc_client_id: Option<String>,
    #[serde(default)]
    oidc_redirect_uri: Option<String>,
    #[serde(default)]
    oidc_silent_redirect_uri: Option<String>,
    #[serde(default)]
    oidc_post_logout_redirect_uri: Option<String>,
    #[serde(default)]
    oidc_scope: Option<String>,
    #[serde(default)]
    enable_mocked_auth: Option<String>,
}

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub app_name: String,
    pub version: String,
    /// Origin the front end runs on; used to build default redirect URIs and
    /// to reject cross-origin post-login redirects.
    pub app_origin: String,
    pub api_base_url: String,
    pub oidc: OidcSettings,
    pub routes: Routes,
    pub feature_flags: FeatureFlags,
}

/// OIDC client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OidcSettings {
    pub issuer: String,
    pub client_id: String,
    pub redirect_uri: String,
    pub silent_redirect_uri: String,
    pub post_logout_redirect_uri: String,
    pub scope: String,
}

/// Route paths of the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routes {
    pub home: String,
    pub auth_callback: String,
    pub silent_refresh: String,
    pub post_logout_redirect: String,
    pub accounts: String,
    pub market: String,
    pub profile: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureFlags {
    pub enable_mocked_auth: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::resolve(EnvConfig::default())
    }
}

impl AppConfig {
    /// Load configuration from the environment, reading `.env` first.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let env: EnvConfig = envy::prefixed(ENV_PREFIX).from_env()?;
        Ok(Self::resolve(env))
    }

    /// Build configuration from explicit `(NAME, value)` pairs (prefixed names).
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env: EnvConfig = envy::prefixed(ENV_PREFIX).from_iter(vars)?;
        Ok(Self::resolve(env))
    }

    fn resolve(env: EnvConfig) -> Self {
        let app_origin = or_default(env.app_origin.clone(), DEFAULT_APP_ORIGIN)
            .trim_end_matches('/')
            .to_string();

        let oidc = OidcSettings {
            issuer: or_default(env.oidc_issuer, DEFAULT_OIDC_ISSUER),
            client_id: or_default(env.oidc_client_id, DEFAULT_OIDC_CLIENT_ID),
            redirect_uri: or_default(
                env.oidc_redirect_uri.clone(),
                &format!("{}/auth/callback", app_origin),
            ),
            silent_redirect_uri: or_default(
                env.oidc_silent_redirect_uri.clone(),
                &format!("{}/auth/silent-refresh", app_origin),
            ),
            post_logout_redirect_uri: or_default(
                env.oidc_post_logout_redirect_uri.clone(),
                &format!("{}/", app_origin),
            ),
            scope: or_default(env.oidc_scope, DEFAULT_OIDC_SCOPE),
        };

        let routes = Routes {
            home: "/".to_string(),
            auth_callback: pathname(env.oidc_redirect_uri.as_deref(), "/auth/callback"),
            silent_refresh: pathname(
                env.oidc_silent_redirect_uri.as_deref(),
                "/auth/silent-refresh",
            ),
            post_logout_redirect: pathname(env.oidc_post_logout_redirect_uri.as_deref(), "/"),
            accounts: "/accounts".to_string(),
            market: "/market".to_string(),
            profile: "/profile".to_string(),
        };

        Self {
            app_name: or_default(env.app_name, DEFAULT_APP_NAME),
            version: or_default(env.app_version, "dev"),
            app_origin,
            api_base_url: or_default(env.api_base_url, DEFAULT_API_URL),
            oidc,
            routes,
            feature_flags: FeatureFlags {
                enable_mocked_auth: env.enable_mocked_auth.as_deref() == Some("true"),
            },
        }
    }

    /// Check that every configured URL parses.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let urls: [(&'static str, &str); 6] = [
            ("app_origin", &self.app_origin),
            ("api_base_url", &self.api_base_url),
            ("oidc.issuer", &self.oidc.issuer),
            ("oidc.redirect_uri", &self.oidc.redirect_uri),
            ("oidc.silent_redirect_uri", &self.oidc.silent_redirect_uri),
            (
                "oidc.post_logout_redirect_uri",
                &self.oidc.post_logout_redirect_uri,
            ),
        ];
        for (name, value) in urls {
            Url::parse(value).map_err(|_| ConfigError::InvalidUrl {
                name,
                value: value.to_string(),
            })?;
        }
        Ok(())
    }
}

fn or_default(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => fallback.to_string(),
    }
}

/// Path component of `url`, or `fallback` when unset or unparseable.
fn pathname(url: Option<&str>, fallback: &str) -> String {
    let Some(raw) = url.filter(|u| !u.is_empty()) else {
        return fallback.to_string();
    };
    match Url::parse(raw) {
        Ok(parsed) if !parsed.path().is_empty() => parsed.path().to_string(),
        _ => fallback.to_string(),
    }
}
