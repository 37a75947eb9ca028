//! HTTP transport for the DailyWire Middleware API
//!
//! This module defines the `Transport` seam the crawler fetches through and
//! a rate-limited `reqwest` implementation with retry logic for transient
//! errors.

use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::error::{Result, TransportError, TransportErrorKind, WireError};
use crate::types::PageParams;

/// Base URL of the Middleware API
pub const MIDDLEWARE_API: &str = "https://middleware-prod.dailywire.com/middleware";

const SHOW_PAGE_ENDPOINT: &str = "v4/getShowPage";
const EPISODE_ENDPOINT: &str = "v4/getEpisode";

const DEFAULT_USER_AGENT: &str = "wireloft/0.1 (+https://www.dailywire.com)";

/// Outcome of a single fetch
pub type TransportResult = std::result::Result<Value, TransportError>;

/// One-GET-per-call collaborator the crawler depends on.
///
/// Implementations return the parsed JSON document of a single request or a
/// `TransportError` describing why it could not be obtained. They must be
/// reentrant if the same instance is shared between concurrent crawls.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch one show page, optionally scoped by extra query parameters.
    async fn fetch_show_page(&self, show_id: &str, extra: Option<&PageParams>) -> TransportResult;

    /// Fetch the detail document of one episode.
    async fn fetch_episode(&self, slug: &str) -> TransportResult;
}

/// Rate limiter to control request frequency
///
/// Ensures consecutive requests are spaced at least `min_interval` apart.
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a limiter allowing `requests_per_second` requests.
    ///
    /// A non-positive rate disables spacing entirely.
    ///
    /// # Example
    /// ```
    /// use wireloft_core::client::RateLimiter;
    ///
    /// let limiter = RateLimiter::new(2.0);
    /// assert_eq!(limiter.min_interval().as_millis(), 500);
    /// ```
    pub fn new(requests_per_second: f64) -> Self {
        let min_interval = if requests_per_second > 0.0 {
            Duration::from_secs_f64(1.0 / requests_per_second)
        } else {
            Duration::ZERO
        };
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Wait until the next request may be sent.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// Configuration for the Middleware HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, without trailing slash (default: production Middleware)
    pub base_url: String,
    /// Maximum requests per second (default: 2.0)
    pub requests_per_second: f64,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Retries for 429 and 5xx responses (default: 3)
    pub max_retries: u32,
    /// First backoff delay in milliseconds, doubled per attempt (default: 1000)
    pub retry_base_delay_ms: u64,
    /// Optional JWT sent as a bearer token; premium shows usually need one
    pub access_token: Option<String>,
    /// Optional membership plan forwarded as `membershipPlan`
    pub membership_plan: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: MIDDLEWARE_API.to_string(),
            requests_per_second: 2.0,
            timeout_secs: 30,
            max_retries: 3,
            retry_base_delay_ms: 1000,
            access_token: None,
            membership_plan: None,
        }
    }
}

/// HTTP client for the Middleware API with rate limiting and retry logic
pub struct WireClient {
    client: reqwest::Client,
    rate_limiter: RateLimiter,
    base_url: String,
    membership_plan: Option<String>,
    max_retries: u32,
    retry_base_delay: Duration,
}

impl WireClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// - `WireError::Config` - the access token is not a valid header value
    /// - `WireError::Client` - the HTTP client cannot be built
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = config.access_token.as_deref().filter(|t| !t.trim().is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
                .map_err(|e| WireError::Config(format!("access token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(config.requests_per_second),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            membership_plan: config.membership_plan.filter(|p| !p.trim().is_empty()),
            max_retries: config.max_retries,
            retry_base_delay: Duration::from_millis(config.retry_base_delay_ms),
        })
    }

    /// Fetch and decode one endpoint.
    ///
    /// `endpoint` is the path relative to the API root including its query
    /// string (e.g. "v4/getEpisode?slug=ep-1"); it is also what error
    /// values report.
    ///
    /// # Errors
    /// - `Network` - connection or body read failure
    /// - `RateLimited` - 429 after all retries
    /// - `Status` - any other non-2xx after retries, with the response body
    /// - `InvalidJson` / `NotAnObject` - body is not a JSON object
    pub async fn fetch(&self, endpoint: &str) -> TransportResult {
        let url = format!("{}/{}", self.base_url, endpoint);
        let body = self.fetch_with_retry(endpoint, &url, 0).await?;

        let parsed: Value = serde_json::from_str(&body).map_err(|e| {
            TransportError::new(endpoint, TransportErrorKind::InvalidJson(e.to_string()))
        })?;
        if !parsed.is_object() {
            return Err(TransportError::new(endpoint, TransportErrorKind::NotAnObject));
        }
        Ok(parsed)
    }

    fn fetch_with_retry<'a>(
        &'a self,
        endpoint: &'a str,
        url: &'a str,
        attempt: u32,
    ) -> Pin<Box<dyn Future<Output = std::result::Result<String, TransportError>> + Send + 'a>>
    {
        Box::pin(async move {
            self.rate_limiter.acquire().await;
            tracing::debug!(endpoint, attempt, "GET");

            let network =
                |e: reqwest::Error| TransportError::new(endpoint, TransportErrorKind::Network(e.to_string()));

            let response = self.client.get(url).send().await.map_err(network)?;
            let status = response.status();

            if status.is_success() {
                return response.text().await.map_err(network);
            }

            let retryable =
                status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
            if retryable && attempt < self.max_retries {
                let delay = self.calculate_backoff_delay(attempt);
                tracing::warn!(
                    endpoint,
                    status = status.as_u16(),
                    delay_ms = delay.as_millis() as u64,
                    "transient HTTP error, retrying"
                );
                sleep(delay).await;
                return self.fetch_with_retry(endpoint, url, attempt + 1).await;
            }

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(TransportError::new(endpoint, TransportErrorKind::RateLimited));
            }

            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!(endpoint, error = %e, "could not read error response body");
                    String::new()
                }
            };
            Err(TransportError::new(
                endpoint,
                TransportErrorKind::Status {
                    status: status.as_u16(),
                    body,
                },
            ))
        })
    }

    /// Exponential backoff: base, 2x base, 4x base, ...
    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        self.retry_base_delay * 2u32.saturating_pow(attempt)
    }

    /// Query parameters for a show page request.
    ///
    /// `extra` is applied last so it can override the defaults.
    fn show_page_params(&self, show_id: &str, extra: Option<&PageParams>) -> PageParams {
        let mut params = PageParams::new();
        params.insert("slug", show_id);
        if let Some(plan) = &self.membership_plan {
            params.insert("membershipPlan", plan.as_str());
        }
        match extra {
            Some(extra) => params.merged_with(extra),
            None => params,
        }
    }
}

/// Render `path?k=v&...` with percent-encoded keys and values.
pub(crate) fn build_endpoint(path: &str, params: &PageParams) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let query = params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(&value.to_string())
            )
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", path, query)
}

#[async_trait]
impl Transport for WireClient {
    async fn fetch_show_page(&self, show_id: &str, extra: Option<&PageParams>) -> TransportResult {
        let params = self.show_page_params(show_id, extra);
        let endpoint = build_endpoint(SHOW_PAGE_ENDPOINT, &params);
        self.fetch(&endpoint).await
    }

    async fn fetch_episode(&self, slug: &str) -> TransportResult {
        let mut params = PageParams::new();
        params.insert("slug", slug);
        let endpoint = build_endpoint(EPISODE_ENDPOINT, &params);
        self.fetch(&endpoint).await
    }
}
