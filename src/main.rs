//! Main entry point for the arena-dl CLI

use arena_dl::cli::{Cli, Commands};
use arena_dl::logging::init_tracing;
use clap::error::ErrorKind;
use clap::Parser;
use tracing::error;

/// Parse arguments; usage errors exit with status 1, help and version with 0
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();

    let cli = parse_cli();

    let result = match cli.command {
        Commands::Get(ref args) => args
            .execute(&cli)
            .await
            .map(|_| ())
            .map_err(anyhow::Error::from),
    };

    if let Err(e) = result {
        error!("Command failed: {:#}", e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
