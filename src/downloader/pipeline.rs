//! Channel download pipeline
//!
//! Stages run strictly in order:
//!
//! 1. Validate inputs (chunk size) and resolve the output directory
//! 2. Fetch the channel summary
//! 3. Fetch every contents page concurrently, flatten in order
//! 4. Download blocks chunk by chunk; each chunk fully settles before the
//!    next one starts
//!
//! Only stages 1-3 can fail the run. Block failures are counted in the
//! [`RunSummary`] and never abort it.

use futures::future::join_all;
use indicatif::ProgressBar;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::downloader::block::{BlockDownloader, BlockOutcome, DownloadContext};
use crate::downloader::config::validate_chunk_size;
use crate::downloader::progress::{ChunkReporter, RunSummary};
use crate::downloader::DownloadError;
use crate::fetcher::{fetch_all_pages, page_count, ChannelFetcher, PAGE_SIZE};
use crate::output::ChannelPathBuilder;
use crate::Block;

/// Stage reached by a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Nothing fetched yet
    Start,
    /// Channel summary received
    FetchedSummary,
    /// Every contents page received
    FetchedAllPages,
    /// Chunks in progress
    Downloading,
    /// Run finished
    Done,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Start => "start",
            PipelineStage::FetchedSummary => "fetched-summary",
            PipelineStage::FetchedAllPages => "fetched-all-pages",
            PipelineStage::Downloading => "downloading",
            PipelineStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Channel slug
    pub slug: String,
    /// Channel title
    pub title: String,
    /// Directory the images were written to
    pub channel_dir: PathBuf,
    /// Block count announced by the summary
    pub total_blocks: u64,
    /// Contents pages fetched
    pub pages: u64,
    /// Chunks processed
    pub chunks: usize,
    /// Final counters
    pub summary: RunSummary,
}

/// Downloads every image block of one channel
pub struct ChannelPipeline {
    fetcher: Box<dyn ChannelFetcher>,
    paths: ChannelPathBuilder,
    chunk_size: usize,
    page_size: u64,
    progress: Option<ProgressBar>,
}

impl std::fmt::Debug for ChannelPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelPipeline")
            .field("slug", self.fetcher.slug())
            .field("channel_dir", &self.paths.channel_dir())
            .field("chunk_size", &self.chunk_size)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl ChannelPipeline {
    /// Create a pipeline
    ///
    /// Validates the chunk size and resolves `output_dir` to an absolute
    /// path. Nothing touches the network or filesystem here.
    ///
    /// # Errors
    /// Returns a validation error if `chunk_size` is outside `[1, 50]` or the
    /// output directory cannot be resolved.
    pub fn new(
        fetcher: Box<dyn ChannelFetcher>,
        output_dir: impl AsRef<Path>,
        chunk_size: usize,
    ) -> Result<Self, DownloadError> {
        let chunk_size = validate_chunk_size(i64::try_from(chunk_size).unwrap_or(i64::MAX))?;
        let paths = ChannelPathBuilder::resolve(output_dir.as_ref(), fetcher.slug())
            .map_err(|e| DownloadError::ValidationError(e.to_string()))?;

        Ok(Self {
            fetcher,
            paths,
            chunk_size,
            page_size: PAGE_SIZE,
            progress: None,
        })
    }

    /// Attach a progress bar advanced after every chunk
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Override the contents page size
    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Blocks downloaded concurrently
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Resolved channel output directory
    pub fn channel_dir(&self) -> &Path {
        self.paths.channel_dir()
    }

    /// Run the whole download
    ///
    /// # Errors
    /// Fails if the summary or any contents page cannot be fetched. Block
    /// failures are reported in the returned summary instead.
    pub async fn run(&self) -> Result<RunReport, DownloadError> {
        let slug = self.fetcher.slug().clone();
        debug!(stage = %PipelineStage::Start, "Starting download of channel {}", slug);

        let summary = self
            .fetcher
            .fetch_summary()
            .await
            .map_err(DownloadError::SummaryFetch)?;
        debug!(stage = %PipelineStage::FetchedSummary, "Fetched summary of channel {}", slug);

        let mut report = RunReport {
            slug: slug.to_string(),
            title: summary.title,
            channel_dir: self.paths.channel_dir().to_path_buf(),
            total_blocks: summary.length,
            pages: 0,
            chunks: 0,
            summary: RunSummary::default(),
        };

        if summary.length == 0 {
            info!("Channel {:?} has no blocks, nothing to download", report.title);
            debug!(stage = %PipelineStage::Done, "Finished channel {}", slug);
            return Ok(report);
        }

        let pages = page_count(summary.length, self.page_size);
        info!(
            "Channel {:?} has {} blocks across {} pages",
            report.title, summary.length, pages
        );

        let blocks = fetch_all_pages(self.fetcher.as_ref(), pages, self.page_size)
            .await
            .map_err(DownloadError::PageFetch)?;
        report.pages = pages;
        debug!(
            stage = %PipelineStage::FetchedAllPages,
            "Fetched {} blocks for channel {}",
            blocks.len(),
            slug
        );

        let (chunks, counts) = self.download_blocks(&blocks).await;
        report.chunks = chunks;
        report.summary = counts;

        info!("Finished channel {:?}: {}", report.title, report.summary);
        debug!(stage = %PipelineStage::Done, "Finished channel {}", slug);
        Ok(report)
    }

    /// Download `blocks` in sequential chunks, returning the chunk count and totals
    async fn download_blocks(&self, blocks: &[Block]) -> (usize, RunSummary) {
        let downloader = BlockDownloader::new(self.fetcher.as_ref(), self.paths.clone());
        let total = blocks.len();
        let total_chunks = total.div_ceil(self.chunk_size);
        let reporter = ChunkReporter::new(total_chunks, total, self.progress.clone());
        let mut summary = RunSummary::default();

        info!(
            stage = %PipelineStage::Downloading,
            "Downloading {} blocks in {} chunks of up to {} into {}",
            total,
            total_chunks,
            self.chunk_size,
            self.paths.channel_dir().display()
        );

        for (chunk_index, chunk) in blocks.chunks(self.chunk_size).enumerate() {
            let offset = chunk_index * self.chunk_size;
            let downloads = chunk.iter().enumerate().map(|(i, block)| {
                let ctx = DownloadContext {
                    index: offset + i + 1,
                    total,
                };
                downloader.download(block, ctx)
            });

            // Settles every download of the chunk; outcomes never short-circuit
            let outcomes: Vec<BlockOutcome> = join_all(downloads).await;
            summary.record_all(&outcomes);
            reporter.chunk_settled(chunk_index, chunk.len(), &summary);
        }

        reporter.finish();
        (total_chunks, summary)
    }
}
