//! Filestore CLI: manage the store directory and query word counts over it.

use anyhow::Result;
use clap::Parser;
use filestore::engine::arg_parser::Cli;
use filestore::engine::handle_run;

fn main() -> Result<()> {
    let cli = Cli::parse();
    handle_run(&cli)
}
