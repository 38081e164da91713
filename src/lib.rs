//! # arena-dl
//!
//! Downloads every image block of an Are.na channel into a local directory.
//!
//! ## Quick Start
//!
//! ```no_run
//! use arena_dl::downloader::ChannelPipeline;
//! use arena_dl::fetcher::{ArenaChannelFetcher, HttpConfig};
//! use arena_dl::ChannelSlug;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let slug = ChannelSlug::parse("arena-influences")?;
//! let fetcher = ArenaChannelFetcher::new(&HttpConfig::default(), slug)?;
//!
//! let pipeline = ChannelPipeline::new(Box::new(fetcher), "./downloads", 10)?;
//! let report = pipeline.run().await?;
//! println!("{}", report.summary);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`identifier`] - Channel slug validation
//! - [`fetcher`] - HTTP access to the channel API (summary, pages, images)
//! - [`output`] - Filename derivation and file writes
//! - [`downloader`] - Per-block downloads and the chunked channel pipeline
//! - [`cli`] - Command-line surface
//! - [`logging`] - Tracing subscriber setup
//!
//! ## Flow
//!
//! A run fetches the channel summary, fetches every contents page at once,
//! flattens the blocks in order, then downloads them in sequential chunks of
//! at most `chunk_size` concurrent requests. Block failures are counted,
//! never propagated; summary and page failures abort the run.

#![warn(missing_docs)]
#![warn(clippy::all)]

use serde::{Deserialize, Serialize};
use std::fmt;

/// CLI command implementations
pub mod cli;

/// Block downloads and channel orchestration
pub mod downloader;

/// Channel API access
pub mod fetcher;

/// Channel slug parsing and validation
pub mod identifier;

/// Tracing subscriber setup
pub mod logging;

/// Output paths and file writes
pub mod output;

pub use identifier::ChannelSlug;

/// Channel metadata returned by the summary endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelSummary {
    /// Display title
    #[serde(default)]
    pub title: String,
    /// Total number of blocks in the channel; required
    pub length: u64,
}

/// One page of the channel contents listing
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContentPage {
    /// Blocks on this page, in server order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub contents: Vec<Block>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Block>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Block>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Block identifier; the API sends numbers but strings are tolerated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum BlockId {
    /// Numeric identifier
    Numeric(u64),
    /// String identifier
    Text(String),
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockId::Numeric(id) => write!(f, "{id}"),
            BlockId::Text(id) => f.write_str(id),
        }
    }
}

impl From<u64> for BlockId {
    fn from(id: u64) -> Self {
        BlockId::Numeric(id)
    }
}

/// One item of a channel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Block {
    /// Block identifier
    pub id: BlockId,
    /// Optional display title
    #[serde(default)]
    pub title: Option<String>,
    /// Image descriptor, absent for text, link and embed blocks
    #[serde(default)]
    pub image: Option<BlockImage>,
}

/// Image descriptor attached to a block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockImage {
    /// Original-resolution version
    pub original: ImageVersion,
    /// Declared MIME type (e.g. `image/jpeg`)
    #[serde(default)]
    pub content_type: Option<String>,
}

/// One rendition of an image
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageVersion {
    /// Download URL
    pub url: String,
}

impl Block {
    /// Original-resolution image URL, if the block carries a usable one
    pub fn image_url(&self) -> Option<&str> {
        self.image
            .as_ref()
            .map(|image| image.original.url.trim())
            .filter(|url| !url.is_empty())
    }

    /// Declared content type of the image
    pub fn content_type(&self) -> Option<&str> {
        self.image.as_ref().and_then(|image| image.content_type.as_deref())
    }

    /// Title with surrounding whitespace removed; blank titles count as absent
    pub fn display_title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
    }
}
