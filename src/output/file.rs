//! Filesystem writes for downloaded payloads

use super::{OutputError, OutputResult};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static STAGING_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Create `dir` and any missing parents; succeeds if it already exists
pub async fn ensure_dir(dir: &Path) -> OutputResult<()> {
    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        OutputError::IoError(format!(
            "Failed to create directory {}: {}",
            dir.display(),
            e
        ))
    })
}

/// Write `bytes` to `path`, replacing any existing file
///
/// The payload is staged in a sibling file and renamed into place, so
/// concurrent writers to the same path leave exactly one complete payload.
pub async fn write_payload(path: &Path, bytes: &[u8]) -> OutputResult<()> {
    let staging = staging_path(path)?;

    if let Err(e) = tokio::fs::write(&staging, bytes).await {
        let _ = tokio::fs::remove_file(&staging).await;
        return Err(OutputError::IoError(format!(
            "Failed to write {}: {}",
            path.display(),
            e
        )));
    }

    if let Err(e) = tokio::fs::rename(&staging, path).await {
        let _ = tokio::fs::remove_file(&staging).await;
        return Err(OutputError::IoError(format!(
            "Failed to move {} into place: {}",
            path.display(),
            e
        )));
    }

    Ok(())
}

/// Unique hidden sibling of `path` used while a write is in flight
fn staging_path(path: &Path) -> OutputResult<PathBuf> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| OutputError::InvalidPath(path.display().to_string()))?;
    let seq = STAGING_COUNTER.fetch_add(1, Ordering::Relaxed);

    Ok(path.with_file_name(format!(".{name}.{}-{seq}.part", std::process::id())))
}
