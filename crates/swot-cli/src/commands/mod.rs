//! Command implementations, one module per subcommand.

pub mod build;
pub mod list;
pub mod lookup;
pub mod query;

use anyhow::{anyhow, Context, Result};
use swot_core::{Config, SearchIndex, Storage};

/// Open storage, honoring a configured data-dir override.
pub fn open_storage(config: &Config) -> Result<Storage> {
    match &config.paths.data_dir {
        Some(dir) => Storage::with_root(dir.clone()).context("failed to open data directory"),
        None => Storage::new().context("failed to open data directory"),
    }
}

/// Load the persisted index or explain how to create one.
pub fn load_index(config: &Config) -> Result<SearchIndex> {
    let storage = open_storage(config)?;
    let persisted = storage
        .load_index()
        .context("failed to load persisted index")?
        .ok_or_else(|| {
            anyhow!(
                "no index found in {}; run `swot build --root DIR --save` first",
                storage.root_dir().display()
            )
        })?;
    Ok(persisted.index)
}
