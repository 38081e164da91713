//! Download configuration constants

use super::DownloadError;

/// Default number of blocks downloaded concurrently
pub const DEFAULT_CHUNK_SIZE: usize = 10;

/// Smallest accepted chunk size
pub const MIN_CHUNK_SIZE: i64 = 1;

/// Largest accepted chunk size.
/// Caps simultaneous outbound image requests.
pub const MAX_CHUNK_SIZE: i64 = 50;

/// Validate a chunk size, returning it as a `usize`
///
/// # Errors
/// Returns a validation error for values outside `[1, 50]`.
pub fn validate_chunk_size(value: i64) -> Result<usize, DownloadError> {
    if !(MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE).contains(&value) {
        return Err(DownloadError::ValidationError(format!(
            "chunk size must be an integer between {MIN_CHUNK_SIZE} and {MAX_CHUNK_SIZE}, got {value}"
        )));
    }
    usize::try_from(value)
        .map_err(|e| DownloadError::ValidationError(format!("invalid chunk size {value}: {e}")))
}
