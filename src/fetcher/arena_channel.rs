//! Are.na channel fetcher
//!
//! Endpoints, relative to the API root:
//! - `channels/{slug}/thumb` - title and block count
//! - `channels/{slug}/contents?page={n}&per={size}` - one contents page

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::fetcher::{ArenaHttpClient, ChannelFetcher, FetcherResult, HttpConfig};
use crate::identifier::ChannelSlug;
use crate::{ChannelSummary, ContentPage};

const CHANNELS_SEGMENT: &str = "channels";
const SUMMARY_SEGMENT: &str = "thumb";
const CONTENTS_SEGMENT: &str = "contents";

/// API client for a single channel
#[derive(Debug, Clone)]
pub struct ArenaChannelFetcher {
    http: ArenaHttpClient,
    slug: ChannelSlug,
}

impl ArenaChannelFetcher {
    /// Create a fetcher for `slug` using the given HTTP settings
    pub fn new(config: &HttpConfig, slug: ChannelSlug) -> FetcherResult<Self> {
        Ok(Self {
            http: ArenaHttpClient::new(config)?,
            slug,
        })
    }

    /// Create a fetcher from an existing HTTP client
    pub fn with_client(http: ArenaHttpClient, slug: ChannelSlug) -> Self {
        Self { http, slug }
    }

    /// API root this fetcher targets
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

#[async_trait]
impl ChannelFetcher for ArenaChannelFetcher {
    fn slug(&self) -> &ChannelSlug {
        &self.slug
    }

    async fn fetch_summary(&self) -> FetcherResult<ChannelSummary> {
        let summary: ChannelSummary = self
            .http
            .get_json(&[CHANNELS_SEGMENT, self.slug.as_str(), SUMMARY_SEGMENT], &[])
            .await?;
        debug!(
            "Channel {} summary: {:?} with {} blocks",
            self.slug, summary.title, summary.length
        );
        Ok(summary)
    }

    async fn fetch_page(&self, page: u64, per: u64) -> FetcherResult<ContentPage> {
        let params = [("page", page.to_string()), ("per", per.to_string())];
        let contents: ContentPage = self
            .http
            .get_json(&[CHANNELS_SEGMENT, self.slug.as_str(), CONTENTS_SEGMENT], &params)
            .await?;
        debug!(
            "Channel {} page {} returned {} blocks",
            self.slug,
            page,
            contents.contents.len()
        );
        Ok(contents)
    }

    async fn fetch_image(&self, url: &str) -> FetcherResult<Bytes> {
        self.http.get_bytes(url).await
    }
}
