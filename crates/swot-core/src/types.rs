//! Core data types shared across the pipeline.

use serde::{Deserialize, Serialize};

use crate::language::Language;

/// One source file of the corpus, loaded into memory.
///
/// Immutable once loaded; the path is relative to the corpus root and acts
/// as the document's identifier.
#[derive(Debug, Clone)]
pub struct Document {
    /// Path relative to the corpus root, with `/` separators.
    pub path: String,
    /// Raw UTF-8 text of the file.
    pub text: String,
}

/// A fenced code example owned by a [`QaEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Normalized language tag inferred from the fence info string.
    pub language: Language,
    /// Literal text between the fences, without the fence lines.
    pub text: String,
}

/// One extracted question/answer unit, possibly with nested follow-ups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaEntry {
    /// Stable identifier: `<relative path>#<ordinal>`, unique per corpus.
    pub id: String,
    /// Question text, taken from the section heading. Never empty.
    pub question: String,
    /// The short "interview answer" paragraph. Empty when none was
    /// recognized; extraction never drops an entry over a missing answer.
    pub short_answer: String,
    /// Code examples directly under the question section, in source order.
    pub code_blocks: Vec<CodeBlock>,
    /// Nested follow-up questions, in source order.
    pub follow_ups: Vec<QaEntry>,
    /// Relative path of the document this entry came from.
    pub source_path: String,
    /// 1-based line of the question heading in the source document.
    pub source_line: usize,
}

/// Non-fatal problem encountered while processing the corpus.
///
/// Diagnostics are data, returned beside successful output; callers decide
/// whether warnings are acceptable for their use case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// How serious the problem is.
    pub severity: DiagnosticSeverity,
    /// Human-readable description.
    pub message: String,
    /// Relative path of the document involved, when known.
    pub path: Option<String>,
    /// 1-based line number, when known.
    pub line: Option<usize>,
}

impl Diagnostic {
    /// Shorthand for a warning attached to a document.
    #[must_use]
    pub fn warn(message: impl Into<String>, path: impl Into<String>, line: Option<usize>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warn,
            message: message.into(),
            path: Some(path.into()),
            line,
        }
    }
}

/// Severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// A document (or part of one) was skipped.
    Error,
    /// A construct was recognized but malformed; output may be partial.
    Warn,
    /// Informational only.
    Info,
}

/// Counters reported by a corpus build.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BuildStats {
    /// Documents successfully loaded and parsed.
    pub documents: usize,
    /// Total entries in the index, nested follow-ups included.
    pub entries: usize,
    /// Distinct terms in the inverted index.
    pub terms: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qa_entry_construction() {
        let entry = QaEntry {
            id: "sql/locks.md#0".to_string(),
            question: "Вопрос 1: Что такое deadlock?".to_string(),
            short_answer: "Взаимная блокировка двух транзакций.".to_string(),
            code_blocks: vec![CodeBlock {
                language: Language::Sql,
                text: "SELECT * FROM sys.dm_tran_locks;".to_string(),
            }],
            follow_ups: vec![],
            source_path: "sql/locks.md".to_string(),
            source_line: 3,
        };

        assert_eq!(entry.id, "sql/locks.md#0");
        assert!(!entry.question.is_empty());
        assert_eq!(entry.code_blocks.len(), 1);
        assert_eq!(entry.code_blocks[0].language, Language::Sql);
    }

    #[test]
    fn diagnostic_severity_serialization() {
        let diagnostic = Diagnostic::warn("unterminated code fence", "notes.md", Some(42));

        let json = serde_json::to_string(&diagnostic).expect("should serialize");
        assert!(json.contains("\"warn\""));

        let back: Diagnostic = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(back.severity, DiagnosticSeverity::Warn);
        assert_eq!(back.line, Some(42));
        assert_eq!(back.path.as_deref(), Some("notes.md"));
    }

    #[test]
    fn qa_entry_round_trips_through_json() {
        let entry = QaEntry {
            id: "a.md#1".to_string(),
            question: "Why?".to_string(),
            short_answer: String::new(),
            code_blocks: vec![],
            follow_ups: vec![QaEntry {
                id: "a.md#2".to_string(),
                question: "And then?".to_string(),
                short_answer: String::new(),
                code_blocks: vec![],
                follow_ups: vec![],
                source_path: "a.md".to_string(),
                source_line: 9,
            }],
            source_path: "a.md".to_string(),
            source_line: 5,
        };

        let json = serde_json::to_string(&entry).expect("should serialize");
        let back: QaEntry = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(back, entry);
    }
}
