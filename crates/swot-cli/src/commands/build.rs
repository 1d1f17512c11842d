//! Build command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use swot_core::{build_index_with, Config};

use crate::commands::open_storage;
use crate::output::{print_build_report, OutputFormat};

/// Build the index from the corpus root, optionally persisting it.
pub fn execute(root: Option<PathBuf>, save: bool, output: OutputFormat) -> Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    let root = root
        .or_else(|| config.paths.corpus_root.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    let build = build_index_with(&root, &config.build)
        .with_context(|| format!("failed to build index from {}", root.display()))?;

    if save {
        let storage = open_storage(&config)?;
        storage
            .save_index(&build.index, build.stats)
            .context("failed to persist index")?;
    }

    print_build_report(build.stats, &build.diagnostics, output)
}
