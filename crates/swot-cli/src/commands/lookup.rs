//! Lookup command implementation.

use anyhow::{anyhow, Context, Result};
use swot_core::Config;

use crate::commands::load_index;
use crate::output::{print_entry, OutputFormat};

/// Show one entry by identifier.
pub fn execute(id: &str, output: OutputFormat) -> Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    let index = load_index(&config)?;

    let entry = index
        .lookup(id)
        .ok_or_else(|| anyhow!("no entry with id '{id}'; try `swot list`"))?;

    print_entry(entry, output)
}
