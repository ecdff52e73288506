//! Binary crate for the `orbit` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive prompts for weather and speed limits
//! - Human-friendly output formatting

use clap::Parser;

mod cli;
mod prompt;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cmd = cli::Cli::parse();
    cmd.run()
}
