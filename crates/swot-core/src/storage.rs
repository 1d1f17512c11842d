//! Persisted index storage.
//!
//! Persistence is optional: the index is correct as a pure in-memory value,
//! and the on-disk JSON is just a cache for reuse across runs. Saves are
//! atomic from a reader's perspective — the new file is written beside the
//! target and renamed over it, so a concurrent load sees either the old
//! index or the new one, never a partial write.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::index::SearchIndex;
use crate::types::BuildStats;

const INDEX_FILE: &str = "index.json";

/// Envelope wrapped around a persisted index.
#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedIndex {
    /// When this index was built.
    pub generated_at: DateTime<Utc>,
    /// Counters from the build that produced it.
    pub stats: BuildStats,
    /// The index itself.
    pub index: SearchIndex,
}

/// Filesystem home for persisted indices.
pub struct Storage {
    root_dir: PathBuf,
}

impl Storage {
    /// Storage rooted at the default data directory.
    ///
    /// Resolution order: `SWOT_DATA_DIR`, then `XDG_DATA_HOME/swot`, then
    /// the platform data directory via `directories`.
    pub fn new() -> Result<Self> {
        if let Ok(dir) = std::env::var("SWOT_DATA_DIR") {
            let trimmed = dir.trim();
            if !trimmed.is_empty() {
                return Self::with_root(PathBuf::from(trimmed));
            }
        }

        if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
            let trimmed = xdg.trim();
            if !trimmed.is_empty() {
                return Self::with_root(PathBuf::from(trimmed).join("swot"));
            }
        }

        let dirs = directories::ProjectDirs::from("dev", "swot", "swot")
            .ok_or_else(|| Error::Storage("failed to determine data directory".into()))?;
        Self::with_root(dirs.data_dir().to_path_buf())
    }

    /// Storage rooted at an explicit directory, created if missing.
    pub fn with_root(root_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root_dir)
            .map_err(|e| Error::Storage(format!("failed to create data directory: {e}")))?;
        Ok(Self { root_dir })
    }

    /// The directory this storage writes into.
    #[must_use]
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Path of the persisted index file.
    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.root_dir.join(INDEX_FILE)
    }

    /// Persist an index, replacing any previous one atomically.
    pub fn save_index(&self, index: &SearchIndex, stats: BuildStats) -> Result<()> {
        let persisted = PersistedIndex {
            generated_at: Utc::now(),
            stats,
            index: index.clone(),
        };
        let json = serde_json::to_string_pretty(&persisted)
            .map_err(|e| Error::Serialization(format!("failed to serialize index: {e}")))?;

        let target = self.index_path();
        let tmp = self.root_dir.join(format!("{INDEX_FILE}.tmp"));
        fs::write(&tmp, json)
            .map_err(|e| Error::Storage(format!("failed to write index: {e}")))?;
        fs::rename(&tmp, &target)
            .map_err(|e| Error::Storage(format!("failed to replace index: {e}")))?;

        info!(path = %target.display(), entries = stats.entries, "index persisted");
        Ok(())
    }

    /// Load a previously persisted index, or `None` when none exists.
    pub fn load_index(&self) -> Result<Option<PersistedIndex>> {
        let path = self.index_path();
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)?;
        let persisted: PersistedIndex = serde_json::from_str(&contents)
            .map_err(|e| Error::Serialization(format!("failed to parse persisted index: {e}")))?;
        debug!(path = %path.display(), "index loaded");
        Ok(Some(persisted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QaEntry;
    use tempfile::TempDir;

    fn small_index() -> SearchIndex {
        let entries = vec![QaEntry {
            id: "a.md#0".to_string(),
            question: "Вопрос 1: Что такое ACID?".to_string(),
            short_answer: "Свойства транзакций.".to_string(),
            code_blocks: vec![],
            follow_ups: vec![],
            source_path: "a.md".to_string(),
            source_line: 1,
        }];
        SearchIndex::build(&entries).expect("should build")
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().expect("tempdir");
        let storage = Storage::with_root(dir.path().to_path_buf()).expect("storage");

        let index = small_index();
        storage
            .save_index(&index, index.stats())
            .expect("should save");

        let loaded = storage
            .load_index()
            .expect("should load")
            .expect("index present");
        assert_eq!(loaded.stats.entries, 1);
        assert!(loaded.index.lookup("a.md#0").is_some());
        assert!(!loaded.index.query(["acid"]).is_empty());
    }

    #[test]
    fn load_without_save_is_none() {
        let dir = TempDir::new().expect("tempdir");
        let storage = Storage::with_root(dir.path().to_path_buf()).expect("storage");
        assert!(storage.load_index().expect("should load").is_none());
    }

    #[test]
    fn save_overwrites_previous_index() {
        let dir = TempDir::new().expect("tempdir");
        let storage = Storage::with_root(dir.path().to_path_buf()).expect("storage");

        let index = small_index();
        storage
            .save_index(&index, index.stats())
            .expect("first save");
        storage
            .save_index(&index, index.stats())
            .expect("second save");

        // No stray temp file left behind.
        assert!(!dir.path().join("index.json.tmp").exists());
        assert!(storage.load_index().expect("load").is_some());
    }
}
