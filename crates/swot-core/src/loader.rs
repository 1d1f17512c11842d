//! Corpus discovery: find and read Markdown documents under a root.
//!
//! Traversal is gitignore-aware via the `ignore` walker, so editor junk and
//! build output next to the notes never leak into the index. Filesystem
//! order is not guaranteed stable across platforms, which is exactly why
//! entry identifiers are path-based rather than position-based; `load_all`
//! additionally sorts by relative path so downstream output is reproducible.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::{Diagnostic, DiagnosticSeverity, Document};

/// Discovers and reads Markdown files under a corpus root.
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    root: PathBuf,
    include_hidden: bool,
}

impl DocumentLoader {
    /// Create a loader for the given corpus root.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            include_hidden: false,
        }
    }

    /// Also descend into hidden files and directories.
    #[must_use]
    pub const fn include_hidden(mut self, yes: bool) -> Self {
        self.include_hidden = yes;
        self
    }

    /// The corpus root this loader walks.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Discover every Markdown file under the root, in sorted relative-path
    /// order. Restartable: walking twice yields the same finite set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the root does not exist. Individual
    /// unreadable directory entries are reported by `load_all`, not here.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        if !self.root.exists() {
            return Err(Error::NotFound(format!(
                "corpus root {} does not exist",
                self.root.display()
            )));
        }

        let mut paths = Vec::new();
        for result in WalkBuilder::new(&self.root)
            .hidden(!self.include_hidden)
            .build()
        {
            match result {
                Ok(entry) => {
                    let path = entry.path();
                    if entry.file_type().is_some_and(|t| t.is_file()) && is_markdown(path) {
                        paths.push(path.to_path_buf());
                    }
                },
                Err(err) => {
                    warn!("walk error under {}: {err}", self.root.display());
                },
            }
        }

        paths.sort();
        debug!(count = paths.len(), root = %self.root.display(), "discovered markdown files");
        Ok(paths)
    }

    /// Read one document. The path must live under the loader's root.
    ///
    /// # Errors
    ///
    /// Surfaces [`Error::Io`] for unreadable or non-UTF-8 files; this
    /// function never swallows read failures — the caller decides whether
    /// to skip or abort.
    pub fn read_document(&self, path: &Path) -> Result<Document> {
        let text = fs::read_to_string(path)?;
        Ok(Document {
            path: self.relative_path(path),
            text,
        })
    }

    /// Load every discoverable document, isolating per-file read failures
    /// into diagnostics so one bad file never blocks the rest of the
    /// corpus.
    pub fn load_all(&self) -> Result<(Vec<Document>, Vec<Diagnostic>)> {
        let mut documents = Vec::new();
        let mut diagnostics = Vec::new();

        for path in self.discover()? {
            match self.read_document(&path) {
                Ok(document) => documents.push(document),
                Err(err) => {
                    warn!("skipping {}: {err}", path.display());
                    diagnostics.push(Diagnostic {
                        severity: DiagnosticSeverity::Error,
                        message: format!("failed to read file: {err}"),
                        path: Some(self.relative_path(&path)),
                        line: None,
                    });
                },
            }
        }

        Ok((documents, diagnostics))
    }

    // Relative to the root, `/`-separated regardless of platform, so ids
    // serialized on one OS resolve on another.
    fn relative_path(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        parts.join("/")
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
}
