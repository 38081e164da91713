//! Output paths and file writes

pub mod file;
pub mod path;

pub use file::{ensure_dir, write_payload};
pub use path::{block_filename, extension_for_content_type, slugify, ChannelPathBuilder};

/// Output errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// Output location could not be resolved
    #[error("invalid output path: {0}")]
    InvalidPath(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
