//! Pagination helpers for the channel contents listing
//!
//! The page count is known up front from the channel summary, so every page
//! is requested at once instead of walking a cursor. Results are flattened
//! in page order, then in server order within each page.
//!
//! The listing is assumed to be stable across concurrently issued page
//! requests. If the channel changes mid-run, blocks can be duplicated or
//! missed; nothing here detects that.

use crate::fetcher::{ChannelFetcher, FetcherError, FetcherResult};
use crate::Block;
use futures::future::join_all;
use tracing::debug;

/// Blocks requested per contents page
pub const PAGE_SIZE: u64 = 100;

/// Number of pages needed to cover `total_blocks`
///
/// ```
/// use arena_dl::fetcher::page_count;
///
/// assert_eq!(page_count(0, 100), 0);
/// assert_eq!(page_count(100, 100), 1);
/// assert_eq!(page_count(101, 100), 2);
/// ```
pub fn page_count(total_blocks: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_blocks.div_ceil(page_size)
}

/// Fetch pages `1..=total_pages` concurrently and flatten their blocks
///
/// Every request is awaited before the results are inspected. If any page
/// failed, the error of the lowest-numbered failed page is returned and no
/// blocks are.
///
/// # Errors
/// Returns the first page failure in page order, annotated with its page
/// number.
pub async fn fetch_all_pages(
    fetcher: &dyn ChannelFetcher,
    total_pages: u64,
    page_size: u64,
) -> FetcherResult<Vec<Block>> {
    debug!(
        "Fetching {} pages of {} for channel {}",
        total_pages,
        page_size,
        fetcher.slug()
    );

    let requests = (1..=total_pages).map(|page| async move {
        fetcher
            .fetch_page(page, page_size)
            .await
            .map_err(|e| annotate_page_error(page, e))
    });
    let pages = join_all(requests).await;

    let mut blocks = Vec::new();
    for page in pages {
        blocks.extend(page?.contents);
    }

    debug!("Collected {} blocks from {} pages", blocks.len(), total_pages);
    Ok(blocks)
}

fn annotate_page_error(page: u64, error: FetcherError) -> FetcherError {
    match error {
        FetcherError::HttpError(msg) => FetcherError::HttpError(format!("page {page}: {msg}")),
        FetcherError::ParseError(msg) => FetcherError::ParseError(format!("page {page}: {msg}")),
        FetcherError::NetworkError(msg) => {
            FetcherError::NetworkError(format!("page {page}: {msg}"))
        }
        other => other,
    }
}
