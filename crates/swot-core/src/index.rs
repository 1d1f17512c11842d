//! In-memory search index over extracted Q&A entries.
//!
//! Two structures, both ordered so that serializing the same corpus twice
//! produces byte-identical output:
//!
//! - a direct lookup table, entry id → [`QaEntry`];
//! - an inverted index, normalized term → set of entry ids (postings).
//!
//! Queries use strict AND semantics: an id matches only when its postings
//! contain every term. Ranking, stemming, and fuzzy matching are external
//! collaborators layered on top; the core index stays exact so its results
//! (and its persisted form) are reproducible.
//!
//! The index is a plain value. Rebuilds construct a fresh `SearchIndex` and
//! replace the old one wholesale; nothing is ever mutated in place.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{BuildStats, QaEntry};

/// Minimum token length kept by the tokenizer. Shorter tokens (single
/// letters, stray digits) add postings without adding selectivity.
pub const MIN_TOKEN_LEN: usize = 2;

/// Immutable search index: lookup table plus inverted term postings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchIndex {
    entries: BTreeMap<String, QaEntry>,
    postings: BTreeMap<String, BTreeSet<String>>,
}

impl SearchIndex {
    /// Build an index from the full ordered set of extracted entries.
    ///
    /// Nested follow-up entries are indexed under their own ids, so a term
    /// occurring only in a follow-up resolves to the follow-up, not its
    /// parent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateId`] when two entries share an id. That is
    /// a cross-file invariant violation, fatal to the whole build.
    pub fn build(entries: &[QaEntry]) -> Result<Self> {
        let mut index = Self::default();
        for entry in entries {
            index.insert(entry)?;
        }
        debug!(
            entries = index.entries.len(),
            terms = index.postings.len(),
            "search index built"
        );
        Ok(index)
    }

    fn insert(&mut self, entry: &QaEntry) -> Result<()> {
        if self.entries.contains_key(&entry.id) {
            return Err(Error::DuplicateId {
                id: entry.id.clone(),
            });
        }

        for term in entry_terms(entry) {
            self.postings
                .entry(term)
                .or_default()
                .insert(entry.id.clone());
        }
        self.entries.insert(entry.id.clone(), entry.clone());

        for follow_up in &entry.follow_ups {
            self.insert(follow_up)?;
        }
        Ok(())
    }

    /// Look up one entry by its identifier.
    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<&QaEntry> {
        self.entries.get(id)
    }

    /// Ids whose postings contain *all* of the given terms (AND semantics).
    ///
    /// Terms are normalized with the same tokenizer used at build time, so
    /// `Deadlock` and `deadlock` query identically. Any term absent from
    /// the index makes the result empty — including a term that normalizes
    /// to nothing (shorter than [`MIN_TOKEN_LEN`], or pure punctuation),
    /// which by construction can never appear in the postings. An empty
    /// term set matches nothing.
    #[must_use]
    pub fn query<I, S>(&self, terms: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut result: Option<BTreeSet<String>> = None;

        for raw in terms {
            let tokens = tokenize(raw.as_ref());
            if tokens.is_empty() {
                return BTreeSet::new();
            }
            for term in tokens {
                let Some(ids) = self.postings.get(&term) else {
                    return BTreeSet::new();
                };
                result = Some(match result {
                    None => ids.clone(),
                    Some(acc) => acc.intersection(ids).cloned().collect(),
                });
            }
        }

        result.unwrap_or_default()
    }

    /// All entry ids in the lookup table, in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries in the lookup table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the index holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counters describing this index; `documents` is filled by the caller.
    #[must_use]
    pub fn stats(&self) -> BuildStats {
        BuildStats {
            documents: 0,
            entries: self.entries.len(),
            terms: self.postings.len(),
        }
    }
}

/// Normalize text into index terms: split on non-alphanumeric boundaries,
/// lowercase, drop tokens shorter than [`MIN_TOKEN_LEN`] characters.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= MIN_TOKEN_LEN)
        .map(str::to_lowercase)
        .collect()
}

// Terms for one entry: question, short answer, and code bodies. Follow-ups
// contribute to their own postings, not the parent's.
fn entry_terms(entry: &QaEntry) -> BTreeSet<String> {
    let mut terms = BTreeSet::new();
    terms.extend(tokenize(&entry.question));
    terms.extend(tokenize(&entry.short_answer));
    for block in &entry.code_blocks {
        terms.extend(tokenize(&block.text));
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;
    use crate::types::CodeBlock;
    use proptest::prelude::*;

    fn entry(id: &str, question: &str, answer: &str, code: &str) -> QaEntry {
        QaEntry {
            id: id.to_string(),
            question: question.to_string(),
            short_answer: answer.to_string(),
            code_blocks: if code.is_empty() {
                vec![]
            } else {
                vec![CodeBlock {
                    language: Language::Sql,
                    text: code.to_string(),
                }]
            },
            follow_ups: vec![],
            source_path: "test.md".to_string(),
            source_line: 1,
        }
    }

    fn sample_entries() -> Vec<QaEntry> {
        vec![
            entry(
                "locks.md#0",
                "Вопрос 1: Что такое deadlock?",
                "Взаимная блокировка транзакций.",
                "SELECT * FROM sys.dm_tran_locks;",
            ),
            entry(
                "locks.md#1",
                "Вопрос 2: Что такое lock escalation?",
                "Переход к табличной блокировке.",
                "",
            ),
            entry(
                "sniffing.md#0",
                "Question 1: What is parameter sniffing?",
                "Plan compiled for the first parameter value.",
                "OPTION (RECOMPILE)",
            ),
        ]
    }

    #[test]
    fn tokenizer_lowercases_and_drops_short_tokens() {
        assert_eq!(
            tokenize("SELECT * FROM sys.dm_tran_locks; -- X"),
            vec!["select", "from", "sys", "dm", "tran", "locks"]
        );
        assert_eq!(tokenize("Вопрос 1: Deadlock"), vec!["вопрос", "deadlock"]);
        assert!(tokenize("a b c !").is_empty());
    }

    #[test]
    fn lookup_finds_entries_by_id() {
        let index = SearchIndex::build(&sample_entries()).expect("should build");
        assert_eq!(index.len(), 3);

        let hit = index.lookup("locks.md#0").expect("entry exists");
        assert!(hit.question.contains("deadlock"));
        assert!(index.lookup("locks.md#99").is_none());
    }

    #[test]
    fn query_uses_and_semantics() {
        let index = SearchIndex::build(&sample_entries()).expect("should build");

        let both: BTreeSet<String> = index.query(["вопрос", "deadlock"]);
        assert_eq!(both.len(), 1);
        assert!(both.contains("locks.md#0"));

        // "вопрос" alone matches both Russian entries.
        assert_eq!(index.query(["вопрос"]).len(), 2);
    }

    #[test]
    fn query_intersection_equals_pairwise_intersection() {
        let index = SearchIndex::build(&sample_entries()).expect("should build");

        let combined = index.query(["что", "блокировка"]);
        let left = index.query(["что"]);
        let right = index.query(["блокировка"]);
        let manual: BTreeSet<String> = left.intersection(&right).cloned().collect();
        assert_eq!(combined, manual);
    }

    #[test]
    fn unknown_term_yields_empty_set_not_error() {
        let index = SearchIndex::build(&sample_entries()).expect("should build");
        assert!(index.query(["несуществующее"]).is_empty());
        assert!(index.query(["deadlock", "несуществующее"]).is_empty());
    }

    #[test]
    fn sub_minimum_terms_are_treated_as_absent() {
        let index = SearchIndex::build(&sample_entries()).expect("should build");

        // "x" never survives tokenization, so it cannot be in the index
        // and must not silently drop out of the conjunction.
        assert!(index.query(["x"]).is_empty());
        assert!(index.query(["deadlock", "x"]).is_empty());
        assert!(index.query(["deadlock", "!!"]).is_empty());
        assert!(!index.query(["deadlock"]).is_empty());
    }

    #[test]
    fn empty_query_matches_nothing() {
        let index = SearchIndex::build(&sample_entries()).expect("should build");
        assert!(index.query(Vec::<&str>::new()).is_empty());
    }

    #[test]
    fn query_normalizes_case() {
        let index = SearchIndex::build(&sample_entries()).expect("should build");
        assert_eq!(index.query(["DEADLOCK"]), index.query(["deadlock"]));
    }

    #[test]
    fn code_block_text_is_indexed() {
        let index = SearchIndex::build(&sample_entries()).expect("should build");
        let hits = index.query(["recompile"]);
        assert_eq!(hits.len(), 1);
        assert!(hits.contains("sniffing.md#0"));
    }

    #[test]
    fn duplicate_id_fails_the_build() {
        let entries = vec![
            entry("a.md#0", "Вопрос 1: X?", "", ""),
            entry("a.md#0", "Вопрос 2: Y?", "", ""),
        ];
        let err = SearchIndex::build(&entries).expect_err("duplicate must fail");
        assert!(matches!(err, Error::DuplicateId { ref id } if id == "a.md#0"));
        assert!(err.is_fatal());
    }

    #[test]
    fn follow_ups_indexed_under_own_ids() {
        let mut parent = entry("a.md#0", "Вопрос 1: Темп-таблицы?", "Да.", "");
        let child = entry("a.md#1", "А что с табличными переменными?", "", "");
        parent.follow_ups.push(child);

        let index = SearchIndex::build(&[parent]).expect("should build");
        assert_eq!(index.len(), 2);

        let hits = index.query(["переменными"]);
        assert_eq!(hits.len(), 1);
        assert!(hits.contains("a.md#1"));
    }

    #[test]
    fn rebuild_is_byte_identical() {
        let entries = sample_entries();
        let first = SearchIndex::build(&entries).expect("should build");
        let second = SearchIndex::build(&entries).expect("should build");

        let a = serde_json::to_vec(&first).expect("should serialize");
        let b = serde_json::to_vec(&second).expect("should serialize");
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn tokenize_output_is_lowercase_and_long_enough(text in ".{0,200}") {
            for token in tokenize(&text) {
                prop_assert!(token.chars().count() >= MIN_TOKEN_LEN);
                prop_assert_eq!(token.to_lowercase(), token.clone());
                prop_assert!(token.chars().all(char::is_alphanumeric));
            }
        }

        #[test]
        fn query_is_order_insensitive(a in "[a-zа-я]{2,8}", b in "[a-zа-я]{2,8}") {
            let index = SearchIndex::build(&sample_entries()).expect("should build");
            prop_assert_eq!(
                index.query([a.as_str(), b.as_str()]),
                index.query([b.as_str(), a.as_str()])
            );
        }
    }
}
