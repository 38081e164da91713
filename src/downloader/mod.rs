//! Block downloads and channel orchestration
//!
//! # Overview
//!
//! 1. **Pipeline**: [`pipeline::ChannelPipeline`] fetches the summary and all
//!    pages, then walks the blocks in chunks
//! 2. **Blocks**: [`block::BlockDownloader`] turns one block into one
//!    [`block::BlockOutcome`]
//! 3. **Progress**: [`progress::RunSummary`] counts outcomes and
//!    [`progress::ChunkReporter`] reports after each chunk
//! 4. **Limits**: [`config`] holds chunk-size bounds
//!
//! # Quick Start
//!
//! ```no_run
//! use arena_dl::downloader::ChannelPipeline;
//! use arena_dl::fetcher::{ArenaChannelFetcher, HttpConfig};
//! use arena_dl::ChannelSlug;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = ArenaChannelFetcher::new(&HttpConfig::default(), ChannelSlug::parse("skies")?)?;
//! let report = ChannelPipeline::new(Box::new(fetcher), "./out", 20)?.run().await?;
//! assert_eq!(report.summary.processed(), report.total_blocks);
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Only input validation, the summary request and page requests produce a
//! [`DownloadError`]. Everything that goes wrong for a single block is
//! reported as [`block::BlockOutcome::Failed`].

pub mod block;
pub mod config;
pub mod pipeline;
pub mod progress;

pub use block::{BlockDownloader, BlockOutcome, DownloadContext, SkipReason};
pub use config::{validate_chunk_size, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE, MIN_CHUNK_SIZE};
pub use pipeline::{ChannelPipeline, PipelineStage, RunReport};
pub use progress::{ChunkReporter, RunSummary};

use crate::fetcher::FetcherError;
use crate::output::OutputError;

/// Download errors
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// Invalid input, raised before any network activity
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Channel summary request failed
    #[error("failed to fetch channel summary: {0}")]
    SummaryFetch(#[source] FetcherError),

    /// A contents page request failed
    #[error("failed to fetch channel contents: {0}")]
    PageFetch(#[source] FetcherError),

    /// Image request failed
    #[error("fetcher error: {0}")]
    FetcherError(String),

    /// Directory creation or file write failed
    #[error("output error: {0}")]
    OutputError(#[from] OutputError),
}
