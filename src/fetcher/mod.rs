//! Channel API fetchers

use crate::identifier::ChannelSlug;
use crate::{ChannelSummary, ContentPage};
use async_trait::async_trait;
use bytes::Bytes;

pub mod arena_channel;
pub mod arena_http;
pub mod http_config;
pub mod pagination;

pub use arena_channel::ArenaChannelFetcher;
pub use arena_http::ArenaHttpClient;
pub use http_config::{HttpConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use pagination::{fetch_all_pages, page_count, PAGE_SIZE};

/// Fetcher errors
#[derive(Debug, thiserror::Error)]
pub enum FetcherError {
    /// Non-success HTTP status
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Response parse error
    #[error("parse error: {0}")]
    ParseError(String),

    /// Network error (connect, timeout, body read)
    #[error("network error: {0}")]
    NetworkError(String),

    /// URL could not be built or parsed
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// Result type for fetcher operations
pub type FetcherResult<T> = Result<T, FetcherError>;

/// Read access to one channel
///
/// Implementations issue exactly one request per call and never retry.
#[async_trait]
pub trait ChannelFetcher: Send + Sync {
    /// Channel this fetcher is bound to
    fn slug(&self) -> &ChannelSlug;

    /// Fetch the channel title and total block count
    async fn fetch_summary(&self) -> FetcherResult<ChannelSummary>;

    /// Fetch one contents page
    ///
    /// # Arguments
    /// * `page` - 1-based page number
    /// * `per` - Page size
    async fn fetch_page(&self, page: u64, per: u64) -> FetcherResult<ContentPage>;

    /// Fetch an image payload as raw bytes
    async fn fetch_image(&self, url: &str) -> FetcherResult<Bytes>;
}
