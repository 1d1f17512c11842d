//! swot CLI - search your Markdown Q&A study notes
//!
//! This is the main entry point for the swot command-line interface.
//! Command implementations live in separate modules under `commands`.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    match cli.command {
        Commands::Build { root, save, output } => commands::build::execute(root, save, output),
        Commands::Query { terms, output } => commands::query::execute(&terms, output),
        Commands::Lookup { id, output } => commands::lookup::execute(&id, output),
        Commands::List { output } => commands::list::execute(output),
    }
}

fn initialize_logging(cli: &Cli) -> Result<()> {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
