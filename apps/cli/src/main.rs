//! refbuilder CLI: API reference stub generator.
//!
//! Turns a plain-text list of class and struct names into one Breathe stub
//! page per symbol plus a linked `reference.md` index.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
