//! Query command implementation.

use anyhow::{Context, Result};
use swot_core::Config;

use crate::commands::load_index;
use crate::output::{print_matches, OutputFormat};

/// Query the persisted index with AND semantics across all terms.
pub fn execute(terms: &[String], output: OutputFormat) -> Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    let index = load_index(&config)?;

    let ids = index.query(terms);
    let matches: Vec<_> = ids
        .iter()
        .map(|id| (id.as_str(), index.lookup(id)))
        .collect();

    print_matches(&matches, output)
}
