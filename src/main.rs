//! # Component Index CLI
//!
//! Binary entry point for the `component-index` command-line tool. It parses
//! arguments with `clap`, sets up logging and dispatches to the subcommand;
//! the pipeline itself lives in the `component_index` library crate.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
