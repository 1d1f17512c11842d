//! The corpus build pipeline: load → segment → extract → index.
//!
//! A single-pass batch transformation. Per-document failures (unreadable
//! files, malformed Markdown) are demoted to diagnostics and never block
//! the rest of the corpus. The only fatal outcome is a duplicate entry
//! identifier at the index step, which signals a cross-file invariant
//! violation rather than one bad input.

use std::path::Path;

use tracing::info;

use crate::config::BuildConfig;
use crate::error::Result;
use crate::extract::extract_entries;
use crate::index::SearchIndex;
use crate::loader::DocumentLoader;
use crate::parser::parse_document;
use crate::types::{BuildStats, Diagnostic, Document, QaEntry};

/// Result of a corpus build: the index plus everything the caller needs to
/// judge it (non-fatal diagnostics and counters).
#[derive(Debug)]
pub struct CorpusBuild {
    /// The freshly built index. Replaces any previous index wholesale.
    pub index: SearchIndex,
    /// Non-fatal problems encountered along the way.
    pub diagnostics: Vec<Diagnostic>,
    /// Build counters for reporting.
    pub stats: BuildStats,
}

/// Build a search index from every Markdown document under `root`, using
/// default build settings.
///
/// # Errors
///
/// Fails when the root does not exist or when two entries collide on an
/// identifier ([`crate::Error::DuplicateId`]). Everything else degrades to
/// diagnostics on the returned [`CorpusBuild`].
pub fn build_index(root: impl AsRef<Path>) -> Result<CorpusBuild> {
    build_index_with(root, &BuildConfig::default())
}

/// Build a search index under `root` with explicit [`BuildConfig`]
/// settings, as configured in `config.toml`.
pub fn build_index_with(root: impl AsRef<Path>, settings: &BuildConfig) -> Result<CorpusBuild> {
    let loader = DocumentLoader::new(root.as_ref()).include_hidden(settings.include_hidden);
    let (documents, diagnostics) = loader.load_all()?;
    build_from_documents(&documents, diagnostics)
}

/// Build an index from already-loaded documents. Useful for tests and for
/// callers that manage their own document loading.
pub fn build_from_documents(
    documents: &[Document],
    mut diagnostics: Vec<Diagnostic>,
) -> Result<CorpusBuild> {
    let mut entries: Vec<QaEntry> = Vec::new();

    for document in documents {
        let parsed = parse_document(&document.text);
        for mut diagnostic in parsed.diagnostics {
            diagnostic.path = Some(document.path.clone());
            diagnostics.push(diagnostic);
        }
        entries.extend(extract_entries(&document.path, &parsed.tree, &mut diagnostics));
    }

    let index = SearchIndex::build(&entries)?;
    let stats = BuildStats {
        documents: documents.len(),
        ..index.stats()
    };

    info!(
        documents = stats.documents,
        entries = stats.entries,
        terms = stats.terms,
        warnings = diagnostics.len(),
        "corpus build complete"
    );

    Ok(CorpusBuild {
        index,
        diagnostics,
        stats,
    })
}
