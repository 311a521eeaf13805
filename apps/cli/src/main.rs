//! statedocs CLI — state reference documents for a markdown vault.
//!
//! Scrapes the state contact directory and renders CSV reference data into
//! one markdown note per state, board, or department of education.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
