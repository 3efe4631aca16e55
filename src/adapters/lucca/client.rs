//! HTTP client for the Lucca HR API
//!
//! [`ApiClient`] is the seam the paginator depends on; [`LuccaClient`] is the
//! reqwest implementation. The client is built once from an immutable
//! [`HttpClientConfig`] and shared behind an `Arc` by every export, so the
//! connection pool and the request throttle are shared as well.

use super::retry::{retry_after, RetryPolicy};
use super::throttle::RequestThrottle;
use crate::config::{ApiConfig, SecretString};
use crate::domain::{ExportError, HttpError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::time::Duration;

/// Source of JSON documents for a given endpoint and query
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Issues a GET on `endpoint` with `params` and returns the decoded body
    ///
    /// An empty body decodes to [`Value::Null`].
    async fn get(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> std::result::Result<Value, HttpError>;
}

/// Timeouts, retry policy and throttle rate for a [`LuccaClient`]
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Time allowed to establish a connection
    pub connect_timeout: Duration,

    /// Time allowed for the whole request
    pub timeout: Duration,

    /// Retry settings
    pub retry: RetryPolicy,

    /// Client-side request budget (0 disables throttling)
    pub requests_per_minute: u32,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(90),
            retry: RetryPolicy::default(),
            requests_per_minute: 50,
        }
    }
}

/// reqwest-backed [`ApiClient`]
///
/// # Example
///
/// ```no_run
/// use lucca_export::adapters::lucca::{ApiClient, HttpClientConfig, LuccaClient};
/// use lucca_export::config::secret_string;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = LuccaClient::with_config(
///     "https://example.ilucca.net",
///     &secret_string("api-key".to_string()),
///     HttpClientConfig::default(),
/// )?;
/// let body = client
///     .get("/api/v3/departments", &[("paging".to_string(), "0,100".to_string())])
///     .await?;
/// println!("{body}");
/// # Ok(())
/// # }
/// ```
pub struct LuccaClient {
    base_url: String,
    http: Client,
    retry: RetryPolicy,
    throttle: Option<RequestThrottle>,
}

impl LuccaClient {
    /// Builds a client from the API section of the configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the API key is missing or cannot be
    /// used as a header value.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let api_key = config.api_key.as_ref().ok_or_else(|| {
            ExportError::Configuration("API key is required to build the client".to_string())
        })?;

        let http_config = HttpClientConfig {
            requests_per_minute: config.requests_per_minute,
            ..HttpClientConfig::default()
        };

        Self::with_config(&config.base_url, api_key, http_config)
    }

    /// Builds a client with explicit HTTP settings
    pub fn with_config(
        base_url: &str,
        api_key: &SecretString,
        config: HttpClientConfig,
    ) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!(
            "lucca application={}",
            api_key.expose_secret().as_ref()
        ))
        .map_err(|e| ExportError::Configuration(format!("Invalid API key: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = ClientBuilder::new()
            .default_headers(headers)
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ExportError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            retry: config.retry,
            throttle: RequestThrottle::per_minute(config.requests_per_minute),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> std::result::Result<String, HttpError> {
        let url = format!("{}{}", self.base_url, endpoint);
        url::Url::parse(&url).map_err(|e| HttpError::InvalidUrl(format!("{url}: {e}")))?;
        Ok(url)
    }

    async fn send_with_retry(
        &self,
        endpoint: &str,
        url: &str,
        params: &[(String, String)],
    ) -> std::result::Result<Value, HttpError> {
        let mut retries: u32 = 0;

        loop {
            if let Some(throttle) = &self.throttle {
                throttle.acquire().await;
            }

            let response = match self.http.get(url).query(params).send().await {
                Ok(response) => response,
                Err(e) => {
                    let err = HttpError::from(e);
                    if err.is_transient() && retries < self.retry.max_retries {
                        retries += 1;
                        let delay = self.retry.backoff(retries);
                        crate::log_retry_attempt!(endpoint, retries, self.retry.max_retries, &err, delay);
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(err);
                }
            };

            let status = response.status();

            if self.retry.is_retryable_status(status) {
                if retries < self.retry.max_retries {
                    retries += 1;
                    let delay = self.retry.delay(retries, retry_after(response.headers()));
                    crate::log_retry_attempt!(endpoint, retries, self.retry.max_retries, status, delay);
                    tokio::time::sleep(delay).await;
                    continue;
                }
                return Err(HttpError::RetriesExhausted {
                    status: status.as_u16(),
                    attempts: retries + 1,
                });
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(HttpError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            let bytes = response.bytes().await.map_err(HttpError::from)?;
            return decode_body(&bytes);
        }
    }
}

#[async_trait]
impl ApiClient for LuccaClient {
    async fn get(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> std::result::Result<Value, HttpError> {
        let url = self.url(endpoint)?;
        tracing::debug!(endpoint = %endpoint, params = ?params, "GET");

        self.send_with_retry(endpoint, &url, params)
            .await
            .inspect_err(|e| {
                tracing::error!(endpoint = %endpoint, error = %e, "Request failed");
            })
    }
}

/// Decodes a response body; blank bodies become `null`
fn decode_body(bytes: &[u8]) -> std::result::Result<Value, HttpError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|e| HttpError::Decode(e.to_string()))
}
