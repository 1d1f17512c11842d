//! List command implementation.

use anyhow::{Context, Result};
use swot_core::Config;

use crate::commands::load_index;
use crate::output::{print_matches, OutputFormat};

/// List every indexed entry as id + question.
pub fn execute(output: OutputFormat) -> Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    let index = load_index(&config)?;

    let matches: Vec<_> = index.ids().map(|id| (id, index.lookup(id))).collect();
    print_matches(&matches, output)
}
