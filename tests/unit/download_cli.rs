//! Unit tests for CLI argument parsing

use arena_dl::cli::{Cli, Commands, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_get_defaults() {
    let cli = Cli::parse_from(["arena-dl", "get", "my-channel"]);

    assert_eq!(cli.output_format, OutputFormat::Human);
    let Commands::Get(args) = cli.command;
    assert_eq!(args.slug, "my-channel");
    assert_eq!(args.output, PathBuf::from("."));
    assert_eq!(args.chunk_size, 10);
}

#[test]
fn test_get_long_flags() {
    let cli = Cli::parse_from([
        "arena-dl",
        "get",
        "my-channel",
        "--output",
        "/tmp/out",
        "--chunk-size",
        "25",
    ]);

    let Commands::Get(args) = cli.command;
    assert_eq!(args.output, PathBuf::from("/tmp/out"));
    assert_eq!(args.chunk_size, 25);
}

#[test]
fn test_get_short_flags() {
    let cli = Cli::parse_from(["arena-dl", "get", "my-channel", "-o", "out", "-c", "1"]);

    let Commands::Get(args) = cli.command;
    assert_eq!(args.output, PathBuf::from("out"));
    assert_eq!(args.chunk_size, 1);
}

#[test]
fn test_output_format_is_global() {
    let cli = Cli::parse_from(["arena-dl", "get", "my-channel", "--output-format", "json"]);
    assert_eq!(cli.output_format, OutputFormat::Json);

    let cli = Cli::parse_from(["arena-dl", "--output-format", "json", "get", "my-channel"]);
    assert_eq!(cli.output_format, OutputFormat::Json);
}

#[test]
fn test_chunk_size_bounds_enforced() {
    for value in ["0", "-1", "51", "abc"] {
        let result = Cli::try_parse_from(["arena-dl", "get", "my-channel", "-c", value]);
        assert!(result.is_err(), "chunk size {value} should be rejected");
    }

    for value in ["1", "50"] {
        let result = Cli::try_parse_from(["arena-dl", "get", "my-channel", "-c", value]);
        assert!(result.is_ok(), "chunk size {value} should be accepted");
    }
}

#[test]
fn test_slug_is_required() {
    assert!(Cli::try_parse_from(["arena-dl", "get"]).is_err());
}
