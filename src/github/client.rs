// GitHub API HTTP client.
// Handles headers, rate limit tracking, request timeouts and response checking.

use std::sync::Mutex;
use std::time::Duration;

use reqwest::{
    Client, Response, Url,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::GitHubConfig;
use crate::error::{FetchError, Result, ShowcaseError};

use super::types::RateLimit;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Upper bound on a single request, including reading the body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// GitHub API client with a request deadline and rate limit tracking.
pub struct GitHubClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
    rate_limit: Mutex<RateLimit>,
}

impl GitHubClient {
    /// Create a client against `base_url`. The token is optional; public
    /// listings work without one at a lower rate limit.
    pub fn new(base_url: &str, timeout: Duration, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| ShowcaseError::Other(e.to_string()))?,
            );
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("showcase"));

        let base_url = Url::parse(base_url)
            .map_err(|e| ShowcaseError::Other(format!("invalid API base {:?}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ShowcaseError::Other(format!("invalid API base {:?}", base_url.as_str())));
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ShowcaseError::Http)?;

        Ok(Self {
            client,
            base_url,
            timeout,
            rate_limit: Mutex::new(RateLimit::default()),
        })
    }

    /// Create a client from the GitHub section of the config.
    pub fn from_config(config: &GitHubConfig) -> Result<Self> {
        Self::new(
            &config.api_base,
            Duration::from_secs(config.timeout_secs),
            config.token.as_deref(),
        )
    }

    /// Get the most recently observed rate limit.
    pub fn rate_limit(&self) -> RateLimit {
        self.rate_limit
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Base URL with `segments` appended. Each segment is percent-encoded, so
    /// a `/` inside one can't reach another path.
    pub fn endpoint_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET the path built from `segments` with query parameters and decode the
    /// JSON body.
    ///
    /// The whole exchange runs under the client timeout; when it fires the
    /// request future is dropped, which aborts the connection.
    pub async fn get_json<T, P>(&self, segments: &[&str], params: &P) -> std::result::Result<T, FetchError>
    where
        T: DeserializeOwned,
        P: serde::Serialize + ?Sized,
    {
        let url = self.endpoint_url(segments);
        debug!(%url, "GET");

        match tokio::time::timeout(self.timeout, self.exchange(&url, params)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(%url, timeout_ms = self.timeout.as_millis() as u64, "request timed out");
                Err(FetchError::Timeout {
                    millis: self.timeout.as_millis() as u64,
                })
            }
        }
    }

    async fn exchange<T, P>(&self, url: &Url, params: &P) -> std::result::Result<T, FetchError>
    where
        T: DeserializeOwned,
        P: serde::Serialize + ?Sized,
    {
        let response = self.client.get(url.clone()).query(params).send().await?;

        self.update_rate_limit(&response);
        let response = self.check_response(response)?;

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// Update rate limit from response headers.
    fn update_rate_limit(&self, response: &Response) {
        let header = |name: &str| -> Option<u64> {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
        };

        let Ok(mut rate_limit) = self.rate_limit.lock() else {
            return;
        };
        if let Some(limit) = header("x-ratelimit-limit") {
            rate_limit.limit = limit;
        }
        if let Some(remaining) = header("x-ratelimit-remaining") {
            rate_limit.remaining = remaining;
        }
        if let Some(reset) = header("x-ratelimit-reset") {
            rate_limit.reset = reset;
        }
    }

    /// Reject anything outside 2xx.
    fn check_response(&self, response: Response) -> std::result::Result<Response, FetchError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == reqwest::StatusCode::FORBIDDEN && self.rate_limit().remaining == 0 {
            let reset_at = chrono::DateTime::from_timestamp(self.rate_limit().reset as i64, 0)
                .map(|dt| dt.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "unknown".to_string());
            warn!(%reset_at, "GitHub rate limit exhausted");
        }

        Err(FetchError::Upstream {
            status: status.as_u16(),
        })
    }
}
