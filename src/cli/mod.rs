//! CLI command implementations

pub mod error;
pub mod get;

pub use error::CliError;
pub use get::{Cli, Commands, GetArgs, OutputFormat};
