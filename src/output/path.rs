//! Deterministic path generation for downloaded blocks
//!
//! Layout: `{output_root}/{channel}/{id}_{slug}.{ext}`
//!
//! - `channel` is the filesystem-safe channel slug
//! - `id` is the block identifier, verbatim
//! - `slug` is the slugified block title, or the identifier when the block
//!   has no title (or its title slugifies to nothing)
//! - `ext` comes from the declared content type
//!
//! # Usage Example
//!
//! ```rust
//! use arena_dl::output::ChannelPathBuilder;
//! use arena_dl::{Block, BlockId, BlockImage, ChannelSlug, ImageVersion};
//! use std::path::PathBuf;
//!
//! let slug = ChannelSlug::parse("skies").unwrap();
//! let builder = ChannelPathBuilder::new(PathBuf::from("/data"), &slug);
//!
//! let block = Block {
//!     id: BlockId::Numeric(42),
//!     title: Some("Red Sky!!".to_string()),
//!     image: Some(BlockImage {
//!         original: ImageVersion { url: "https://example.com/a.jpg".to_string() },
//!         content_type: Some("image/jpeg".to_string()),
//!     }),
//! };
//!
//! assert_eq!(builder.block_path(&block), PathBuf::from("/data/skies/42_red-sky.jpg"));
//! ```

use super::{OutputError, OutputResult};
use crate::identifier::ChannelSlug;
use crate::Block;
use std::path::{Path, PathBuf};

/// Extension used when the content type is missing or unrecognized
pub const FALLBACK_EXTENSION: &str = "bin";

/// Path builder for one channel's output directory
#[derive(Debug, Clone)]
pub struct ChannelPathBuilder {
    channel_dir: PathBuf,
}

impl ChannelPathBuilder {
    /// Create a builder rooted at `root_dir`
    ///
    /// The slug is sanitized so the channel directory cannot escape the root.
    pub fn new(root_dir: PathBuf, slug: &ChannelSlug) -> Self {
        Self {
            channel_dir: root_dir.join(slug.to_filesystem_safe()),
        }
    }

    /// Resolve `root_dir` against the current directory, then build
    ///
    /// The directory does not need to exist yet.
    pub fn resolve(root_dir: &Path, slug: &ChannelSlug) -> OutputResult<Self> {
        let absolute = std::path::absolute(root_dir).map_err(|e| {
            OutputError::InvalidPath(format!("{}: {}", root_dir.display(), e))
        })?;
        Ok(Self::new(absolute, slug))
    }

    /// Directory receiving every file of this channel
    pub fn channel_dir(&self) -> &Path {
        &self.channel_dir
    }

    /// Full destination path of a block's image
    pub fn block_path(&self, block: &Block) -> PathBuf {
        self.channel_dir.join(block_filename(block))
    }
}

/// Filename for a block: `{id}_{slug(title or id)}.{ext}`
pub fn block_filename(block: &Block) -> String {
    let id = block.id.to_string();
    let stem = block
        .display_title()
        .map(slugify)
        .filter(|slug| !slug.is_empty())
        .unwrap_or_else(|| slugify(&id));
    let stem = if stem.is_empty() { sanitize_component(&id) } else { stem };

    format!(
        "{}_{}.{}",
        sanitize_component(&id),
        stem,
        extension_for_content_type(block.content_type())
    )
}

/// Lowercase, filename-safe slug
///
/// Letters and digits are kept (lowercased). Runs of whitespace, `-` and `_`
/// collapse into a single `-`. Everything else is dropped. Leading and
/// trailing separators are trimmed.
///
/// ```
/// use arena_dl::output::slugify;
///
/// assert_eq!(slugify("Red Sky!!"), "red-sky");
/// assert_eq!(slugify("  a / b  "), "a-b");
/// ```
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;

    for c in input.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_separator = true;
        }
    }

    slug
}

/// File extension for a declared MIME type, `bin` when unknown
///
/// ```
/// use arena_dl::output::extension_for_content_type;
///
/// assert_eq!(extension_for_content_type(Some("image/jpeg")), "jpg");
/// assert_eq!(extension_for_content_type(Some("application/x-unknown")), "bin");
/// assert_eq!(extension_for_content_type(None), "bin");
/// ```
pub fn extension_for_content_type(content_type: Option<&str>) -> &'static str {
    let Some(content_type) = content_type else {
        return FALLBACK_EXTENSION;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.as_str() {
        "image/jpeg" | "image/jpg" | "image/pjpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "image/bmp" => "bmp",
        "image/tiff" => "tiff",
        "image/avif" => "avif",
        "image/heic" => "heic",
        "image/x-icon" | "image/vnd.microsoft.icon" => "ico",
        _ => FALLBACK_EXTENSION,
    }
}

/// Keep an identifier from introducing path separators
fn sanitize_component(name: &str) -> String {
    name.replace("..", "__").replace(['/', '\\', ':'], "_")
}
