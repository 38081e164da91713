//! Single block download
//!
//! A [`BlockDownloader`] turns one block into one [`BlockOutcome`]. It never
//! returns an error: fetch and write failures become `Failed` outcomes so the
//! rest of the chunk keeps going.

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::downloader::DownloadError;
use crate::fetcher::ChannelFetcher;
use crate::output::{ensure_dir, write_payload, ChannelPathBuilder};
use crate::Block;

/// Position of a block within the run, used for log labels only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadContext {
    /// 1-based sequence index
    pub index: usize,
    /// Total number of blocks in the run
    pub total: usize,
}

impl fmt::Display for DownloadContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}/{}]", self.index, self.total)
    }
}

/// Why a block was not downloaded without anything going wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Block carries no image descriptor or an empty image URL
    NoImage,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoImage => f.write_str("no image present"),
        }
    }
}

/// Result of processing one block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOutcome {
    /// Image written to `path`
    Downloaded {
        /// Destination file
        path: PathBuf,
    },
    /// Nothing to download
    Skipped {
        /// Why the block was skipped
        reason: SkipReason,
    },
    /// Fetch or write failed
    Failed {
        /// Human-readable error message
        reason: String,
    },
}

impl BlockOutcome {
    /// Whether the image was written to disk
    pub fn is_downloaded(&self) -> bool {
        matches!(self, BlockOutcome::Downloaded { .. })
    }
}

/// Downloads blocks of one channel into its output directory
pub struct BlockDownloader<'a> {
    fetcher: &'a dyn ChannelFetcher,
    paths: ChannelPathBuilder,
}

impl<'a> BlockDownloader<'a> {
    /// Create a downloader writing below `paths.channel_dir()`
    pub fn new(fetcher: &'a dyn ChannelFetcher, paths: ChannelPathBuilder) -> Self {
        Self { fetcher, paths }
    }

    /// Directory receiving the images
    pub fn channel_dir(&self) -> &Path {
        self.paths.channel_dir()
    }

    /// Download one block
    ///
    /// Blocks without an image are skipped before any I/O happens.
    pub async fn download(&self, block: &Block, ctx: DownloadContext) -> BlockOutcome {
        let Some(url) = block.image_url() else {
            debug!("{} Block {} has no image, skipping", ctx, block.id);
            return BlockOutcome::Skipped {
                reason: SkipReason::NoImage,
            };
        };

        match self.fetch_and_write(block, url).await {
            Ok(path) => {
                debug!("{} Saved block {} to {}", ctx, block.id, path.display());
                BlockOutcome::Downloaded { path }
            }
            Err(e) => {
                warn!("{} Failed to download block {}: {}", ctx, block.id, e);
                BlockOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn fetch_and_write(&self, block: &Block, url: &str) -> Result<PathBuf, DownloadError> {
        ensure_dir(self.paths.channel_dir()).await?;

        let bytes = self
            .fetcher
            .fetch_image(url)
            .await
            .map_err(|e| DownloadError::FetcherError(e.to_string()))?;

        let path = self.paths.block_path(block);
        write_payload(&path, &bytes).await?;
        Ok(path)
    }
}
