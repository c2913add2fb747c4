//! textstat command-line entry point

use anyhow::Result;
use clap::Parser;
use textstat_cli::commands::Commands;

/// Word-frequency statistics with a checksum-keyed cache
#[derive(Debug, Parser)]
#[command(name = "textstat", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
