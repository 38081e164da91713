//! Run counters and per-chunk progress reporting.
//!
//! Counters are updated on the control flow after each chunk settles, so
//! they need no synchronization. Reports go to `tracing` and, when one is
//! attached, to an `indicatif` progress bar.

use indicatif::ProgressBar;
use serde::Serialize;
use std::fmt;
use tracing::info;

use super::block::BlockOutcome;

/// Running totals for one channel download
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Images written to disk
    pub downloaded: u64,
    /// Blocks without an image
    pub skipped: u64,
    /// Blocks whose fetch or write failed
    pub failed: u64,
}

impl RunSummary {
    /// Count one outcome
    pub fn record(&mut self, outcome: &BlockOutcome) {
        match outcome {
            BlockOutcome::Downloaded { .. } => self.downloaded += 1,
            BlockOutcome::Skipped { .. } => self.skipped += 1,
            BlockOutcome::Failed { .. } => self.failed += 1,
        }
    }

    /// Count every outcome of a settled chunk
    pub fn record_all<'a>(&mut self, outcomes: impl IntoIterator<Item = &'a BlockOutcome>) {
        for outcome in outcomes {
            self.record(outcome);
        }
    }

    /// Blocks processed so far
    pub fn processed(&self) -> u64 {
        self.downloaded + self.skipped + self.failed
    }

    /// Blocks that did not end up on disk, for whatever reason
    pub fn unsuccessful(&self) -> u64 {
        self.skipped + self.failed
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} downloaded, {} skipped, {} failed",
            self.downloaded, self.skipped, self.failed
        )
    }
}

/// Emits one report per settled chunk
#[derive(Debug)]
pub struct ChunkReporter {
    total_chunks: usize,
    total_blocks: usize,
    progress: Option<ProgressBar>,
}

impl ChunkReporter {
    /// Reporter for a run of `total_blocks` split into `total_chunks`
    pub fn new(total_chunks: usize, total_blocks: usize, progress: Option<ProgressBar>) -> Self {
        if let Some(pb) = &progress {
            pb.set_length(total_blocks as u64);
            pb.set_position(0);
        }
        Self {
            total_chunks,
            total_blocks,
            progress,
        }
    }

    /// Report that chunk `chunk_index` (0-based) of `chunk_len` blocks settled
    pub fn chunk_settled(&self, chunk_index: usize, chunk_len: usize, summary: &RunSummary) {
        let message = format_chunk_progress(chunk_index + 1, self.total_chunks, summary);
        info!(
            chunk = chunk_index + 1,
            chunks = self.total_chunks,
            processed = summary.processed(),
            total = self.total_blocks,
            "{}",
            message
        );

        if let Some(pb) = &self.progress {
            pb.inc(chunk_len as u64);
            pb.set_message(summary.to_string());
        }
    }

    /// Clear the progress bar once the run ends
    pub fn finish(&self) {
        if let Some(pb) = &self.progress {
            pb.finish_and_clear();
        }
    }
}

/// Human-readable progress line for a settled chunk
pub fn format_chunk_progress(chunk_number: usize, total_chunks: usize, summary: &RunSummary) -> String {
    format!("Chunk {chunk_number}/{total_chunks} complete: {summary}")
}
