//! Channel slug parsing and validation
//!
//! A slug is the opaque identifier the remote API uses to name a channel
//! (e.g. `arena-influences`). It is used verbatim in request paths and,
//! after sanitization, as the name of the channel's output directory.

use std::fmt;

/// Validated, non-empty channel slug
///
/// # Examples
///
/// ```
/// use arena_dl::identifier::ChannelSlug;
///
/// let slug = ChannelSlug::parse("  arena-influences ").unwrap();
/// assert_eq!(slug.as_str(), "arena-influences");
/// assert!(ChannelSlug::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelSlug {
    value: String,
}

impl ChannelSlug {
    /// Parse a slug, trimming surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns an error if the slug is empty after trimming or contains
    /// control characters.
    pub fn parse(s: &str) -> Result<Self, IdentifierError> {
        let value = s.trim();
        if value.is_empty() {
            return Err(IdentifierError::Empty);
        }

        if value.chars().any(char::is_control) {
            return Err(IdentifierError::InvalidFormat(format!(
                "slug {value:?} contains control characters"
            )));
        }

        Ok(Self {
            value: value.to_string(),
        })
    }

    /// Raw slug as sent to the API
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Directory name for this channel
    ///
    /// Replaces `..` with `__` and `/`, `\`, `:` with `_` so the channel
    /// directory always stays inside the output root.
    ///
    /// ```
    /// use arena_dl::identifier::ChannelSlug;
    ///
    /// let slug = ChannelSlug::parse("../etc/passwd").unwrap();
    /// assert_eq!(slug.to_filesystem_safe(), "___etc_passwd");
    /// ```
    pub fn to_filesystem_safe(&self) -> String {
        self.value.replace("..", "__").replace(['/', '\\', ':'], "_")
    }
}

impl fmt::Display for ChannelSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl std::str::FromStr for ChannelSlug {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Errors that can occur during slug parsing
#[derive(Debug, thiserror::Error)]
pub enum IdentifierError {
    /// Slug was empty or whitespace only
    #[error("channel slug must be a non-empty string")]
    Empty,

    /// Slug contains characters the API can never accept
    #[error("invalid channel slug: {0}")]
    InvalidFormat(String),
}
