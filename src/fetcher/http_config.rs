//! HTTP client configuration
//!
//! All outbound requests share one immutable [`HttpConfig`]. It is built once
//! by the caller and handed to the API client at construction, so tests can
//! point the whole pipeline at a mock server by overriding `base_url`.

use reqwest::Client;
use std::time::Duration;

use crate::fetcher::{FetcherError, FetcherResult};

/// Public Are.na API root
pub const DEFAULT_BASE_URL: &str = "https://api.are.na/v2";

/// Identifying user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("arena-dl/", env!("CARGO_PKG_VERSION"));

/// HTTP connect timeout (seconds) - time to establish TCP connection
const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
/// HTTP request timeout (seconds) - overall time for the entire request
const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Process-scoped HTTP settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// API root; endpoint paths are appended as path segments
    pub base_url: String,
    /// Value of the `User-Agent` header
    pub user_agent: String,
    /// Overall per-request timeout
    pub request_timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl HttpConfig {
    /// Default settings against a different API root
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Build a reqwest client carrying the user agent and timeouts
    pub fn build_client(&self) -> FetcherResult<Client> {
        Client::builder()
            .user_agent(self.user_agent.clone())
            .connect_timeout(self.connect_timeout)
            .timeout(self.request_timeout)
            .build()
            .map_err(|e| FetcherError::ClientBuild(e.to_string()))
    }
}
