//! HTTP client helper for the channel API
//!
//! Wraps a configured [`reqwest::Client`] with:
//! - Endpoint URL construction from percent-encoded path segments
//! - JSON and raw-bytes GET helpers
//! - Status checking (any non-2xx is an error)
//!
//! Requests are issued once. There is no retry or backoff: the caller decides
//! whether a failure is fatal.

use bytes::Bytes;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::fetcher::{FetcherError, FetcherResult, HttpConfig};

/// Maximum number of body bytes quoted in an error message
const ERROR_BODY_LIMIT: usize = 200;

/// HTTP client bound to one API root
#[derive(Debug, Clone)]
pub struct ArenaHttpClient {
    client: Client,
    base_url: Url,
}

impl ArenaHttpClient {
    /// Create a client from configuration
    ///
    /// # Errors
    /// Returns an error if the base URL does not parse or the underlying
    /// client cannot be built.
    pub fn new(config: &HttpConfig) -> FetcherResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| FetcherError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(FetcherError::InvalidUrl(format!(
                "{} cannot be used as an API root",
                config.base_url
            )));
        }

        Ok(Self {
            client: config.build_client()?,
            base_url,
        })
    }

    /// API root this client targets
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Build an endpoint URL by appending path segments to the API root
    ///
    /// Each segment is percent-encoded, so a slug can never escape its
    /// position in the path.
    pub fn endpoint(&self, segments: &[&str]) -> FetcherResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetcherError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET an endpoint and decode the JSON body
    ///
    /// # Arguments
    /// * `segments` - Path segments below the API root
    /// * `params` - Query parameters as key-value pairs
    pub async fn get_json<T>(&self, segments: &[&str], params: &[(&str, String)]) -> FetcherResult<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        debug!("GET {} with {} params", url, params.len());

        let response = self
            .client
            .get(url.clone())
            .query(params)
            .send()
            .await
            .map_err(|e| FetcherError::NetworkError(format!("{url}: {e}")))?;
        let response = check_status(response).await?;

        response.json::<T>().await.map_err(|e| {
            FetcherError::ParseError(format!("failed to deserialize response from {url}: {e}"))
        })
    }

    /// GET an absolute URL and return the raw body
    pub async fn get_bytes(&self, url: &str) -> FetcherResult<Bytes> {
        let url = Url::parse(url).map_err(|e| FetcherError::InvalidUrl(format!("{url}: {e}")))?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetcherError::NetworkError(format!("{url}: {e}")))?;
        let response = check_status(response).await?;

        response
            .bytes()
            .await
            .map_err(|e| FetcherError::NetworkError(format!("failed to read body of {url}: {e}")))
    }
}

/// Turn any non-2xx response into an error carrying the status and body head
async fn check_status(response: Response) -> FetcherResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().clone();
    let body = response.text().await.unwrap_or_default();
    let body = truncate(body.trim(), ERROR_BODY_LIMIT);

    if body.is_empty() {
        Err(FetcherError::HttpError(format!("{status} from {url}")))
    } else {
        Err(FetcherError::HttpError(format!("{status} from {url}: {body}")))
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
