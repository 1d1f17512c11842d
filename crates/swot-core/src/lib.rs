//! # swot-core
//!
//! Core functionality for swot - an indexer and search engine for Markdown
//! Q&A study notes.
//!
//! The crate turns a directory of interview-preparation documents
//! (question headings, blockquoted short answers, fenced T-SQL/C# code
//! examples) into a structured, queryable knowledge base: a direct lookup
//! table from entry id to [`QaEntry`], plus an inverted term index with
//! exact AND-query semantics.
//!
//! ## Pipeline
//!
//! Load → segment → extract → classify → index, as one-way batch
//! transformations:
//!
//! - **Loader**: discovers and reads Markdown files under a corpus root
//! - **Parser**: splits each document into a fence-aware section tree
//! - **Extractor**: recognizes question/answer/code conventions in sections
//! - **Index**: builds lookup + postings with stable, path-based ids
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use swot_core::{build_index, Result};
//!
//! fn main() -> Result<()> {
//!     let build = build_index("./notes")?;
//!     for warning in &build.diagnostics {
//!         eprintln!("{}", warning.message);
//!     }
//!
//!     for id in build.index.query(["deadlock", "victim"]) {
//!         if let Some(entry) = build.index.lookup(&id) {
//!             println!("{}: {}", entry.id, entry.question);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error handling
//!
//! Per-document problems degrade to [`Diagnostic`]s returned alongside the
//! build; only cross-file identifier collisions abort with
//! [`Error::DuplicateId`]. See [`error`] for the taxonomy.

/// Global configuration loaded from `config.toml`
pub mod config;
/// Error types and result aliases
pub mod error;
/// Q&A extraction heuristics over section trees
pub mod extract;
/// Inverted index and lookup table
pub mod index;
/// Fence-info language classification
pub mod language;
/// Corpus discovery and document loading
pub mod loader;
/// Fence-aware Markdown section parser
pub mod parser;
/// The load → segment → extract → index pipeline
pub mod pipeline;
/// Persisted index storage
pub mod storage;
/// Core data types and structures
pub mod types;

// Re-export commonly used types
pub use config::{BuildConfig, Config, PathsConfig};
pub use error::{Error, Result};
pub use extract::{extract_entries, is_follow_up_heading, is_question_heading, short_answer_of};
pub use index::{tokenize, SearchIndex};
pub use language::Language;
pub use loader::DocumentLoader;
pub use parser::{parse_document, ContentBlock, ParseResult, Section, SectionId, SectionTree};
pub use pipeline::{build_from_documents, build_index, build_index_with, CorpusBuild};
pub use storage::{PersistedIndex, Storage};
pub use types::{BuildStats, CodeBlock, Diagnostic, DiagnosticSeverity, Document, QaEntry};
