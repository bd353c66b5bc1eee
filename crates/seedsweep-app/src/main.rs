#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Binary entrypoint that clears finished torrents from a Transmission
//! daemon in one pass.

use std::path::PathBuf;

use clap::Parser;
use seedsweep_app::{AppResult, run_app};

#[derive(Parser)]
#[command(
    name = "seedsweep",
    version,
    about = "Stops and clears finished torrents via transmission-remote"
)]
struct Cli {
    #[arg(long, env = "SEEDSWEEP_CONFIG")]
    config: Option<PathBuf>,
}

/// Runs one sweep cycle and exits.
#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();
    run_app(cli.config.as_deref()).await
}
