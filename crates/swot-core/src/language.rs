//! Fence-info language classification.
//!
//! Fenced code blocks in the corpus carry an optional info string
//! (` ```sql `, ` ```csharp `, or nothing at all). Classification maps that
//! free-form string onto a closed set of tags; it is a total function with
//! no failure path, so a typo in a fence annotation can never break a build.

use serde::{Deserialize, Serialize};

/// Normalized language tag for a fenced code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// T-SQL / SQL examples, the bulk of the corpus.
    Sql,
    /// C# snippets (ADO.NET, Dapper and similar call sites).
    CSharp,
    /// Plain-text blocks: sample output, ASCII tables, pseudo-code.
    Text,
    /// XML fragments (query plans, configuration).
    Xml,
    /// Empty or unrecognized fence info.
    Unspecified,
}

impl Language {
    /// Classify a raw fence info string.
    ///
    /// Trims and lowercases the string, then matches it against the known
    /// aliases. Only the first word of the info string is considered, so
    /// ` ```sql title=demo ` still classifies as SQL.
    #[must_use]
    pub fn classify(info: &str) -> Self {
        let tag = info
            .trim()
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();

        match tag.as_str() {
            "sql" | "tsql" | "t-sql" | "mssql" => Self::Sql,
            "csharp" | "cs" | "c#" => Self::CSharp,
            "text" | "plaintext" | "txt" | "plain" => Self::Text,
            "xml" => Self::Xml,
            _ => Self::Unspecified,
        }
    }

    /// The lowercase tag used in serialized output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sql => "sql",
            Self::CSharp => "csharp",
            Self::Text => "text",
            Self::Xml => "xml",
            Self::Unspecified => "unspecified",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
