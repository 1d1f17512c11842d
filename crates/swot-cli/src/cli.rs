//! CLI structure and argument parsing.
//!
//! The interface follows a standard command-subcommand pattern:
//!
//! ```bash
//! # Build an index from a directory of notes and persist it
//! swot build --root ./notes --save
//!
//! # Query the persisted index (AND semantics across terms)
//! swot query deadlock victim
//!
//! # Show one entry in full
//! swot lookup "locking.md#3"
//!
//! # List everything that was extracted
//! swot list
//! ```
//!
//! Most commands support `-o json` for machine-readable output.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Top-level CLI for the `swot` command.
#[derive(Debug, Parser)]
#[command(name = "swot", version, about = "Search your Markdown Q&A study notes")]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug-level logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the index from a corpus of Markdown notes
    Build {
        /// Corpus root directory (defaults to the configured root, then `.`)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Persist the index for later `query`/`lookup`/`list` runs
        #[arg(long)]
        save: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// Query the persisted index; all terms must match (AND)
    Query {
        /// Search terms
        #[arg(required = true)]
        terms: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// Show one entry by its identifier (e.g. `locking.md#3`)
    Lookup {
        /// Entry identifier
        id: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// List all indexed entries
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
}
