//! Command-line front end for converting between GEDCOM and interchange JSON.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
