//! Error types and handling for swot-core operations.
//!
//! All fallible public functions in this crate return [`Result<T>`]. The
//! error type distinguishes per-document problems (which callers typically
//! downgrade to diagnostics and keep going) from corpus-wide invariant
//! violations (which abort a build).
//!
//! ```rust
//! use swot_core::Result;
//!
//! fn handle(result: Result<()>) {
//!     match result {
//!         Err(e) if e.is_fatal() => eprintln!("build aborted: {e}"),
//!         Err(e) => eprintln!("{}: {e}", e.category()),
//!         Ok(()) => {},
//!     }
//! }
//! ```

use thiserror::Error;

/// The main error type for swot-core operations.
///
/// `Display` provides user-friendly messages; the underlying source chain is
/// preserved where one exists (notably for I/O failures).
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers reading corpus files and writing persisted indices. The
    /// underlying `std::io::Error` is preserved.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Two extracted entries resolved to the same identifier.
    ///
    /// Identifiers are path-qualified and ordinal-based, so a collision
    /// means the loader/extractor invariants were violated upstream. This
    /// aborts the whole build rather than producing an index with
    /// ambiguous postings.
    #[error("Duplicate entry identifier: {id}")]
    DuplicateId {
        /// The identifier that appeared more than once.
        id: String,
    },

    /// Persisted index storage operation failed.
    ///
    /// Covers data-directory resolution, serialization envelopes, and the
    /// atomic-rename save path beyond plain file I/O.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource was not found.
    ///
    /// Used for missing corpus roots and lookups of unknown entry
    /// identifiers at the CLI boundary.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Returns a short, stable category name for this error.
    ///
    /// Useful for logging and metrics without matching on variants at the
    /// call site.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::DuplicateId { .. } => "index",
            Self::Storage(_) => "storage",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::Serialization(_) => "serialization",
        }
    }

    /// Whether this error invalidates an entire corpus build.
    ///
    /// Per-document failures are isolated by the pipeline and reported as
    /// diagnostics; only cross-file consistency violations are fatal.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::DuplicateId { .. })
    }
}

/// Convenient result alias used throughout swot-core.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert_and_categorize() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        assert_eq!(err.category(), "io");
        assert!(!err.is_fatal());
        assert!(err.to_string().starts_with("IO error:"));
    }

    #[test]
    fn duplicate_id_is_fatal() {
        let err = Error::DuplicateId {
            id: "notes/locks.md#0".into(),
        };
        assert!(err.is_fatal());
        assert_eq!(err.category(), "index");
        assert!(err.to_string().contains("notes/locks.md#0"));
    }

    #[test]
    fn storage_errors_are_not_fatal() {
        let err = Error::Storage("disk full".into());
        assert!(!err.is_fatal());
        assert_eq!(err.category(), "storage");
    }
}
