//! nestflat - flatten nested JSON into a stream of leaf values
//!
//! Reads JSON (or JSON Lines) from a file or stdin and writes every leaf as
//! jsonl/json/raw output.

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_tracing(cli.verbose, cli.quiet);
    cli::run(cli)
}
