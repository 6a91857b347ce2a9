//! Low-level HTTP client: `WalletHttp`.
//!
//! Resolves paths against the API base URL, injects the bearer token and
//! normalizes non-2xx responses into [`HttpError::Api`]. Returns wire types;
//! conversion to view models happens in the domain sub-clients.

use crate::error::HttpError;
use crate::http::retry::RetryPolicy;

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use url::Url;

/// Supplies the bearer token for each request.
///
/// Returning `None` sends the request unauthenticated.
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    async fn access_token(&self) -> Option<String>;
}

/// A fixed token (or none). Useful for service accounts and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(pub Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }
}

#[async_trait]
impl AccessTokenSource for StaticToken {
    async fn access_token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Low-level HTTP client for the wallet REST API.
#[derive(Clone)]
pub struct WalletHttp {
    base_url: Url,
    client: Client,
    tokens: Arc<dyn AccessTokenSource>,
}

impl WalletHttp {
    pub fn new(base_url: &str, tokens: Arc<dyn AccessTokenSource>) -> Result<Self, HttpError> {
        let base_url =
            Url::parse(base_url).map_err(|e| HttpError::InvalidUrl(format!("{base_url}: {e}")))?;

        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder
                .timeout(Duration::from_secs(30))
                .pool_max_idle_per_host(10);
        }

        Ok(Self {
            base_url,
            client: builder.build()?,
            tokens,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append an API path (e.g. `/accounts`) to the base URL, keeping any
    /// path prefix the base carries.
    pub fn url(&self, path: &str) -> Result<Url, HttpError> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|e| HttpError::InvalidUrl(format!("{path}: {e}")))
    }

    // ── Typed helpers ────────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let resp = self
            .request_with_retry(Method::GET, path, None::<&()>, retry)
            .await?;
        decode(resp).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, HttpError> {
        let resp = self
            .request_with_retry(Method::POST, path, Some(body), RetryPolicy::None)
            .await?;
        decode(resp).await
    }

    /// POST whose response body is ignored (204 endpoints).
    pub async fn post_empty<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), HttpError> {
        self.request_with_retry(Method::POST, path, Some(body), RetryPolicy::None)
            .await?;
        Ok(())
    }

    pub async fn put_empty<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), HttpError> {
        self.request_with_retry(Method::PUT, path, Some(body), RetryPolicy::None)
            .await?;
        Ok(())
    }

    pub async fn delete_empty<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), HttpError> {
        self.request_with_retry(Method::DELETE, path, body, RetryPolicy::None)
            .await?;
        Ok(())
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn request_with_retry<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        retry: RetryPolicy,
    ) -> Result<Response, HttpError> {
        let url = self.url(path)?;
        let Some(config) = retry.config() else {
            return self.do_request(&method, &url, body).await;
        };

        let mut attempt = 0;
        loop {
            let err = match self.do_request(&method, &url, body).await {
                Ok(resp) => return Ok(resp),
                Err(e) => e,
            };
            if !config.should_retry(&err) {
                return Err(err);
            }
            if attempt >= config.max_retries {
                return Err(HttpError::MaxRetriesExceeded {
                    attempts: attempt + 1,
                    last_error: err.to_string(),
                });
            }
            let delay = config.delay_for_attempt(attempt);
            tracing::debug!(
                attempt = attempt + 1,
                max = config.max_retries,
                delay_ms = delay.as_millis() as u64,
                "Retrying request to {}: {}",
                url,
                err
            );
            futures_timer::Delay::new(delay).await;
            attempt += 1;
        }
    }

    async fn do_request<B: Serialize + ?Sized>(
        &self,
        method: &Method,
        url: &Url,
        body: Option<&B>,
    ) -> Result<Response, HttpError> {
        let mut req = self.client.request(method.clone(), url.clone());

        if let Some(token) = self.tokens.access_token().await {
            req = req.bearer_auth(token);
        }

        if let Some(b) = body {
            req = req.json(b);
        }

        tracing::debug!(%method, %url, "Sending request");
        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp);
        }

        let body_text = match resp.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(%url, status = status.as_u16(), "Failed to read error body: {}", e);
                String::new()
            }
        };
        Err(normalize_api_error(status.as_u16(), &body_text))
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, HttpError> {
    let status = resp.status();
    let bytes = resp.bytes().await?;
    if status == StatusCode::NO_CONTENT || bytes.is_empty() {
        return Ok(serde_json::from_value(Value::Null)?);
    }
    Ok(serde_json::from_slice(&bytes)?)
}

/// Build an [`HttpError::Api`] from a non-2xx status and its raw body.
///
/// The message comes from the body when it is a string, a string `detail`,
/// a `detail` list of `{msg}` entries or a `{msg}` object. Bodies that are
/// not JSON keep the generic message.
pub fn normalize_api_error(status: u16, body: &str) -> HttpError {
    let detail: Option<Value> = match serde_json::from_str(body) {
        Ok(v) => Some(v),
        Err(_) if body.trim().is_empty() => None,
        Err(e) => {
            tracing::debug!(status, "Error body is not JSON: {}", e);
            None
        }
    };

    let message = detail
        .as_ref()
        .and_then(detail_message)
        .unwrap_or_else(|| format!("API request failed with status {}", status));

    HttpError::Api {
        status,
        message,
        detail,
    }
}

fn detail_message(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(detail_message),
        Value::Object(map) => map
            .get("detail")
            .and_then(detail_message)
            .or_else(|| map.get("msg").and_then(detail_message))
            .or_else(|| map.get("message").and_then(detail_message)),
        _ => None,
    }
}
