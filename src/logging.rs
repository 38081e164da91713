//! Tracing subscriber setup for the binary
//!
//! `RUST_LOG` selects the filter (default [`DEFAULT_FILTER`]) and
//! `LOG_FORMAT=json` switches to JSON lines. Logs always go to stderr so the
//! final report on stdout stays parseable.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "arena_dl=info";

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    /// Interpret a `LOG_FORMAT` value; anything but `json` means text
    pub fn from_setting(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Build the filter from a `RUST_LOG` value, falling back to [`DEFAULT_FILTER`]
pub fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber from `RUST_LOG` and `LOG_FORMAT`
pub fn init_tracing() {
    let directives = std::env::var("RUST_LOG").ok();
    let format = LogFormat::from_setting(std::env::var("LOG_FORMAT").ok().as_deref());
    let filter = env_filter(directives.as_deref());

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}
