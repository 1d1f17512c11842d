//! Line-based Markdown section parser.
//!
//! Splits a document into a tree of ATX-headed sections (`#` through
//! `######`), preserving nesting and source order. The tree is an arena:
//! sections live in a flat `Vec` and refer to each other by index, which
//! keeps traversal iterative and serialization trivial even for documents
//! with pathological nesting depth.
//!
//! The one correctness-critical rule: heading detection is suspended inside
//! fenced code blocks. The corpus is full of SQL comments and sample output
//! containing `#` at the start of a line; a naive scanner would shred those
//! into phantom sections. Fence state is tracked explicitly, and an
//! unterminated fence is a warning rather than an error — source documents
//! are not guaranteed well-formed, and the remainder of the file simply
//! belongs to the open fence.

use crate::types::Diagnostic;

/// Index of a [`Section`] within its [`SectionTree`] arena.
pub type SectionId = usize;

/// A content unit belonging directly to one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    /// A run of prose lines, blank-line delimited (one paragraph).
    Prose(String),
    /// A fenced code block.
    Fence {
        /// Raw info string after the opening backticks (may be empty).
        info: String,
        /// Literal body between the fences, without the fence lines.
        body: String,
        /// False when the closing fence was missing at end of input.
        closed: bool,
    },
}

/// One node of the section tree.
#[derive(Debug, Clone)]
pub struct Section {
    /// Heading text with the `#` markers stripped. Empty for the root.
    pub heading: String,
    /// Heading level 1-6; the synthetic root sits at level 0.
    pub level: usize,
    /// 1-based line number of the heading; 0 for the root.
    pub line: usize,
    /// Parent section, `None` only for the root.
    pub parent: Option<SectionId>,
    /// Child sections in source order.
    pub children: Vec<SectionId>,
    /// Content blocks belonging directly to this section (not to
    /// descendants), in source order.
    pub blocks: Vec<ContentBlock>,
}

/// Arena of sections for one document, rooted at a synthetic level-0 node.
#[derive(Debug, Clone)]
pub struct SectionTree {
    sections: Vec<Section>,
}

impl SectionTree {
    /// The synthetic root section (always present, always index 0).
    #[must_use]
    pub const fn root(&self) -> SectionId {
        0
    }

    /// Borrow a section by id.
    ///
    /// # Panics
    ///
    /// Ids are only minted by this module, so an out-of-range id is a bug.
    #[must_use]
    pub fn get(&self, id: SectionId) -> &Section {
        &self.sections[id]
    }

    /// Number of sections, the root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// True when the tree holds only the synthetic root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.len() == 1
    }

    /// Iterate all sections in arena (document pre-order) order.
    pub fn iter(&self) -> impl Iterator<Item = (SectionId, &Section)> + '_ {
        self.sections.iter().enumerate()
    }
}

/// Output of [`parse_document`].
#[derive(Debug)]
pub struct ParseResult {
    /// The section tree, never empty (at minimum the synthetic root).
    pub tree: SectionTree,
    /// Structural warnings collected during the scan.
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse one document's raw text into a section tree.
///
/// Deterministic: parsing the same text twice yields structurally identical
/// trees. Never fails; malformed constructs degrade to diagnostics.
#[must_use]
pub fn parse_document(text: &str) -> ParseResult {
    Parser::new().run(text)
}

struct Parser {
    sections: Vec<Section>,
    // Stack of open sections; invariant: levels strictly increase from
    // bottom (the root, level 0) to top.
    open: Vec<SectionId>,
    prose: String,
    fence: Option<OpenFence>,
    diagnostics: Vec<Diagnostic>,
}

struct OpenFence {
    info: String,
    marker_len: usize,
    body: String,
    start_line: usize,
}

impl Parser {
    fn new() -> Self {
        let root = Section {
            heading: String::new(),
            level: 0,
            line: 0,
            parent: None,
            children: Vec::new(),
            blocks: Vec::new(),
        };
        Self {
            sections: vec![root],
            open: vec![0],
            prose: String::new(),
            fence: None,
            diagnostics: Vec::new(),
        }
    }

    fn run(mut self, text: &str) -> ParseResult {
        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;

            if let Some(marker_len) = self.fence.as_ref().map(|f| f.marker_len) {
                if is_closing_fence(line, marker_len) {
                    if let Some(fence) = self.fence.take() {
                        self.push_block(ContentBlock::Fence {
                            info: fence.info,
                            body: fence.body,
                            closed: true,
                        });
                    }
                } else if let Some(fence) = self.fence.as_mut() {
                    fence.body.push_str(line);
                    fence.body.push('\n');
                }
                continue;
            }

            if let Some((marker_len, info)) = opening_fence(line) {
                self.flush_prose();
                self.fence = Some(OpenFence {
                    info: info.to_string(),
                    marker_len,
                    body: String::new(),
                    start_line: line_no,
                });
                continue;
            }

            if let Some((level, heading)) = atx_heading(line) {
                self.flush_prose();
                self.open_section(level, heading.to_string(), line_no);
                continue;
            }

            if line.trim().is_empty() {
                self.flush_prose();
            } else {
                self.prose.push_str(line);
                self.prose.push('\n');
            }
        }

        self.flush_prose();

        if let Some(fence) = self.fence.take() {
            self.diagnostics.push(Diagnostic {
                severity: crate::types::DiagnosticSeverity::Warn,
                message: "unterminated code fence; rest of document treated as code".to_string(),
                path: None,
                line: Some(fence.start_line),
            });
            self.push_block(ContentBlock::Fence {
                info: fence.info,
                body: fence.body,
                closed: false,
            });
        }

        ParseResult {
            tree: SectionTree {
                sections: self.sections,
            },
            diagnostics: self.diagnostics,
        }
    }

    fn current(&self) -> SectionId {
        *self.open.last().unwrap_or(&0)
    }

    fn push_block(&mut self, block: ContentBlock) {
        let current = self.current();
        self.sections[current].blocks.push(block);
    }

    fn flush_prose(&mut self) {
        if self.prose.is_empty() {
            return;
        }
        let paragraph = std::mem::take(&mut self.prose);
        self.push_block(ContentBlock::Prose(paragraph.trim_end().to_string()));
    }

    fn open_section(&mut self, level: usize, heading: String, line: usize) {
        // Close everything at the same or deeper level; the new section
        // attaches under the first ancestor with a strictly lower level.
        while self.sections[self.current()].level >= level {
            self.open.pop();
        }

        let parent = self.current();
        let id = self.sections.len();
        self.sections.push(Section {
            heading,
            level,
            line,
            parent: Some(parent),
            children: Vec::new(),
            blocks: Vec::new(),
        });
        self.sections[parent].children.push(id);
        self.open.push(id);
    }
}

/// Recognize an ATX heading: 1-6 `#` characters followed by whitespace and
/// non-empty text. Seven or more `#` is not a heading, nor is a bare `#`.
fn atx_heading(line: &str) -> Option<(usize, &str)> {
    let trimmed = line.trim_start();
    let level = trimmed.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &trimmed[level..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let heading = rest.trim();
    if heading.is_empty() {
        return None;
    }
    Some((level, heading))
}

/// Recognize an opening fence: at least three backticks, optionally
/// indented, followed by the info string. The info string itself must not
/// contain backticks (that would be an inline code span, not a fence).
fn opening_fence(line: &str) -> Option<(usize, &str)> {
    let trimmed = line.trim_start();
    let marker_len = trimmed.chars().take_while(|&c| c == '`').count();
    if marker_len < 3 {
        return None;
    }
    let info = trimmed[marker_len..].trim();
    if info.contains('`') {
        return None;
    }
    Some((marker_len, info))
}

/// A closing fence is a backtick run at least as long as the opener, with
/// nothing else on the line.
fn is_closing_fence(line: &str, marker_len: usize) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= marker_len && trimmed.chars().all(|c| c == '`')
}
