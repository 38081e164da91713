//! `get` command implementation

use crate::downloader::{validate_chunk_size, ChannelPipeline, RunReport, DEFAULT_CHUNK_SIZE};
use crate::fetcher::{ArenaChannelFetcher, HttpConfig};
use crate::identifier::ChannelSlug;
use clap::{ArgAction, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

use super::CliError;

/// Parse and validate a chunk size
///
/// Accepts any integer syntactically so that negative values are reported
/// as out of range rather than as unknown flags.
fn parse_chunk_size(s: &str) -> Result<usize, String> {
    let value: i64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a valid integer"))?;
    validate_chunk_size(value).map_err(|e| e.to_string())
}

/// Are.na channel downloader CLI
#[derive(Parser, Debug)]
#[command(name = "arena-dl")]
#[command(about = "Download every image block of an Are.na channel", long_about = None)]
#[command(version, disable_version_flag = true)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Final report format (json or human)
    #[arg(long, global = true, default_value = "human")]
    pub output_format: OutputFormat,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}

/// CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download all image blocks of a channel
    Get(GetArgs),
}

/// Arguments for `get`
#[derive(Parser, Debug)]
pub struct GetArgs {
    /// Channel slug (e.g. arena-influences)
    pub slug: String,

    /// Output directory; images go to <OUTPUT>/<slug>/
    #[arg(short = 'o', long, default_value = ".")]
    pub output: PathBuf,

    /// Number of blocks downloaded concurrently (1-50)
    #[arg(
        short = 'c',
        long,
        default_value_t = DEFAULT_CHUNK_SIZE,
        value_parser = parse_chunk_size,
        allow_negative_numbers = true
    )]
    pub chunk_size: usize,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Human-readable output
    Human,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" => Ok(OutputFormat::Human),
            _ => Err(format!("Invalid output format: {s}. Valid options: human, json")),
        }
    }
}

impl GetArgs {
    /// Execute the download
    pub async fn execute(&self, cli: &Cli) -> Result<RunReport, CliError> {
        self.execute_with(cli, &HttpConfig::default()).await
    }

    /// Execute the download against a specific HTTP configuration
    pub async fn execute_with(&self, cli: &Cli, http: &HttpConfig) -> Result<RunReport, CliError> {
        let slug = ChannelSlug::parse(&self.slug)?;
        let fetcher = ArenaChannelFetcher::new(http, slug)?;
        let pipeline = ChannelPipeline::new(Box::new(fetcher), &self.output, self.chunk_size)?;

        let progress = create_progress_bar(cli.output_format);
        let pipeline = pipeline.with_progress(progress.clone());

        info!(
            "Starting download of channel {} into {} (chunk size {})",
            self.slug,
            pipeline.channel_dir().display(),
            pipeline.chunk_size()
        );

        let result = pipeline.run().await;
        progress.finish_and_clear();

        match cli.output_format {
            OutputFormat::Json => output_json(&self.slug, &result),
            OutputFormat::Human => output_human(&result),
        }

        result.map_err(CliError::DownloadError)
    }
}

/// Output the run result as a single JSON object
fn output_json(slug: &str, result: &Result<RunReport, crate::downloader::DownloadError>) {
    let output = match result {
        Ok(report) => serde_json::json!({
            "success": true,
            "slug": report.slug,
            "title": report.title,
            "output_dir": report.channel_dir.display().to_string(),
            "total_blocks": report.total_blocks,
            "pages": report.pages,
            "chunks": report.chunks,
            "downloaded": report.summary.downloaded,
            "skipped": report.summary.skipped,
            "failed": report.summary.failed,
            "error": null,
        }),
        Err(e) => serde_json::json!({
            "success": false,
            "slug": slug,
            "error": e.to_string(),
        }),
    };

    println!("{output}");
}

/// Output the run result in human-readable form
fn output_human(result: &Result<RunReport, crate::downloader::DownloadError>) {
    match result {
        Ok(report) if report.total_blocks == 0 => {
            println!("\nChannel {:?} is empty, nothing to download.", report.title);
        }
        Ok(report) => {
            println!("\nDownload of {:?} complete!", report.title);
            println!("Output: {}", report.channel_dir.display());
            println!("Downloaded: {}", report.summary.downloaded);
            println!("Failed: {}", report.summary.unsuccessful());
            if report.summary.skipped > 0 {
                println!("  without image: {}", report.summary.skipped);
                println!("  errors: {}", report.summary.failed);
            }
        }
        Err(_) => eprintln!("\nDownload failed!"),
    }
}

/// Create the chunk progress bar; hidden for JSON output
fn create_progress_bar(format: OutputFormat) -> ProgressBar {
    if format == OutputFormat::Json {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}
