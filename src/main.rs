//! allcat - cat with display modes over a streaming stage chain
//!
//! allcat provides:
//! - Concatenation of files and standard input
//! - cat's -A/-b/-e/-E/-n/-s/-t/-T/-v display modes, chunk-boundary safe
//! - Input lists read from files (-f)
//! - Directory listings (--list) in table/jsonl/json

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

mod backends;
mod cli;
mod core;
mod stages;

/// Log to stderr; ALLCAT_LOG takes precedence over the verbosity flags
fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_env("ALLCAT_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_logging(cli.log_level());
    cli::run(cli)
}
