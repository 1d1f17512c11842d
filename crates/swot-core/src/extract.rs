//! Q&A extraction from parsed section trees.
//!
//! The corpus follows an informal convention rather than a grammar: a
//! question is a heading like `## Вопрос 7: ...` (or any heading ending in
//! `?`), the short "interview answer" is a blockquoted paragraph with a
//! bolded lead-in (`> **Ответ**: ...`), and tricky follow-up questions live
//! under a sub-heading such as `### Каверзные вопросы`, either as numbered
//! list items or as sub-sections of their own.
//!
//! Each convention is recognized by its own small predicate so the
//! heuristics stay independently testable and swappable. Extraction is
//! best-effort and per-section: a question with no recognizable answer
//! still produces an entry (with an empty short answer and a warning), and
//! a malformed section never blocks extraction of its siblings.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::language::Language;
use crate::parser::{ContentBlock, SectionId, SectionTree};
use crate::types::{CodeBlock, Diagnostic, QaEntry};

// "Вопрос 12", "Question 3", "Вопрос №4" - a question marker followed by a
// number. Headings ending in "?" are caught separately.
static QUESTION_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"(?i)\b(?:вопрос|question)\s*(?:№\s*)?\d+").expect("static regex")
});

// "Каверзные вопросы", "Tricky questions", "Follow-up questions".
static FOLLOW_UP_RE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"(?i)каверзн|tricky|follow[\s-]?up").expect("static regex")
});

// A bolded short-answer label opening a (possibly blockquoted) paragraph:
// "> **Ответ**: ...", "**Answer:** ...", "> **Короткий ответ.** ...".
static SHORT_ANSWER_RE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(
        r"(?i)^\s*(?:>\s*)*\*\*\s*(?:короткий\s+)?(?:ответ|short\s+answer|answer)\s*[:.]?\s*\*\*\s*[:.]?\s*",
    )
    .expect("static regex")
});

// "1. text" / "2) text" - numbered follow-up items inside a follow-up
// group's prose.
static NUMBERED_ITEM_RE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^\s*\d+\s*[.)]\s+(\S.*)$").expect("static regex")
});

/// Does this heading start a question section?
#[must_use]
pub fn is_question_heading(heading: &str) -> bool {
    QUESTION_NUMBER_RE.is_match(heading) || heading.trim_end().ends_with('?')
}

/// Does this heading introduce a group of tricky follow-up questions?
#[must_use]
pub fn is_follow_up_heading(heading: &str) -> bool {
    FOLLOW_UP_RE.is_match(heading)
}

/// Extract the short-answer text from a paragraph, if it carries the
/// bolded answer lead-in. Quote markers (`>`) are stripped from every line.
#[must_use]
pub fn short_answer_of(paragraph: &str) -> Option<String> {
    let matched = SHORT_ANSWER_RE.find(paragraph)?;
    let rest = &paragraph[matched.end()..];

    let cleaned: Vec<&str> = rest
        .lines()
        .map(|line| line.trim_start().trim_start_matches('>').trim())
        .collect();
    let answer = cleaned.join(" ").trim().to_string();
    if answer.is_empty() {
        None
    } else {
        Some(answer)
    }
}

/// Extract all Q&A entries from one document's section tree, in document
/// order. Identifiers are `<path>#<ordinal>` with a pre-order ordinal, so
/// re-parsing an unchanged document yields identical ids.
#[must_use]
pub fn extract_entries(
    doc_path: &str,
    tree: &SectionTree,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<QaEntry> {
    let mut extractor = Extractor {
        doc_path,
        tree,
        next_ordinal: 0,
        diagnostics,
    };

    let mut entries = Vec::new();
    extractor.collect_into(tree.root(), &mut entries);
    debug!(path = doc_path, entries = entries.len(), "extracted Q&A entries");
    entries
}

struct Extractor<'a> {
    doc_path: &'a str,
    tree: &'a SectionTree,
    next_ordinal: usize,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl Extractor<'_> {
    fn mint_id(&mut self) -> String {
        let id = format!("{}#{}", self.doc_path, self.next_ordinal);
        self.next_ordinal += 1;
        id
    }

    // Walk non-question structure looking for question sections. Heading
    // levels cap at six, so recursion depth is bounded by the format.
    fn collect_into(&mut self, id: SectionId, out: &mut Vec<QaEntry>) {
        let children = self.tree.get(id).children.clone();
        for child in children {
            if is_question_heading(&self.tree.get(child).heading) {
                let entry = self.build_entry(child);
                out.push(entry);
                // A question section may still contain deeper structure
                // that is neither a follow-up group nor covered above.
                self.collect_nested(child, out);
            } else {
                self.collect_into(child, out);
            }
        }
    }

    // Descend into the non-follow-up children of a question section so a
    // free-standing nested question still becomes its own entry.
    fn collect_nested(&mut self, question: SectionId, out: &mut Vec<QaEntry>) {
        let children = self.tree.get(question).children.clone();
        for child in children {
            let heading = &self.tree.get(child).heading;
            if is_follow_up_heading(heading) {
                continue; // already consumed as follow-ups
            }
            if is_question_heading(heading) {
                let entry = self.build_entry(child);
                out.push(entry);
                self.collect_nested(child, out);
            } else {
                self.collect_into(child, out);
            }
        }
    }

    fn build_entry(&mut self, id: SectionId) -> QaEntry {
        let section = self.tree.get(id);
        let question = section.heading.clone();
        let source_line = section.line;
        let entry_id = self.mint_id();

        let mut short_answer = None;
        let mut code_blocks = Vec::new();
        for block in &section.blocks {
            match block {
                ContentBlock::Prose(paragraph) => {
                    if short_answer.is_none() {
                        short_answer = short_answer_of(paragraph);
                    }
                },
                ContentBlock::Fence { info, body, .. } => {
                    code_blocks.push(CodeBlock {
                        language: Language::classify(info),
                        text: body.clone(),
                    });
                },
            }
        }

        if short_answer.is_none() {
            self.diagnostics.push(Diagnostic::warn(
                format!("no short answer recognized for question '{question}'"),
                self.doc_path,
                Some(source_line),
            ));
        }

        let mut follow_ups = Vec::new();
        let children = self.tree.get(id).children.clone();
        for child in children {
            if is_follow_up_heading(&self.tree.get(child).heading) {
                self.collect_follow_ups(child, &mut follow_ups);
            }
        }

        QaEntry {
            id: entry_id,
            question,
            short_answer: short_answer.unwrap_or_default(),
            code_blocks,
            follow_ups,
            source_path: self.doc_path.to_string(),
            source_line,
        }
    }

    // A follow-up group contributes entries from two shapes: numbered list
    // items in its own prose, and question-headed sub-sections.
    fn collect_follow_ups(&mut self, group: SectionId, out: &mut Vec<QaEntry>) {
        let group_line = self.tree.get(group).line;
        let blocks = self.tree.get(group).blocks.clone();
        for block in blocks {
            if let ContentBlock::Prose(paragraph) = block {
                for line in paragraph.lines() {
                    if let Some(caps) = NUMBERED_ITEM_RE.captures(line) {
                        let question = caps[1].trim().to_string();
                        let id = self.mint_id();
                        out.push(QaEntry {
                            id,
                            question,
                            short_answer: String::new(),
                            code_blocks: Vec::new(),
                            follow_ups: Vec::new(),
                            source_path: self.doc_path.to_string(),
                            source_line: group_line,
                        });
                    }
                }
            }
        }

        let children = self.tree.get(group).children.clone();
        for child in children {
            if is_question_heading(&self.tree.get(child).heading) {
                let entry = self.build_entry(child);
                out.push(entry);
            }
        }
    }
}
