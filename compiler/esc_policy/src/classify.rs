//! Markup-or-data document classification.
//!
//! A best-effort heuristic: a file with script tags or XML is markup; a
//! file with five or more start tags is markup; a file whose few start
//! tags all sit inside script string literals (an async JSON response
//! carrying an HTML snippet, say) is data. It can be wrong, so the
//! decision comes with its reason and can be overridden by configuration.

use std::fmt;

use esc_lexer_core::{tokenize, TokenKind};
use esc_markup::{Run, RunKind};
use serde::{Deserialize, Serialize};

use crate::EscapeConfig;

/// From this many counted start tags on, a file is markup outright.
const MARKUP_TAG_THRESHOLD: usize = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Checked run by run: attributes, content, script.
    Markup,
    /// Checked as one script blob in the `data` context.
    Data,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Markup => f.write_str("markup"),
            DocumentKind::Data => f.write_str("data"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClassifyReason {
    Override,
    /// An XML section or a script tag.
    StructuralRun(RunKind),
    ManyTags,
    NoTags,
    /// This many start tags were not found inside string literals.
    TagsOutsideStrings(usize),
    /// All of this many start tags were inside string literals.
    AllTagsInStrings(usize),
}

impl fmt::Display for ClassifyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifyReason::Override => f.write_str("forced by configuration"),
            ClassifyReason::StructuralRun(kind) => write!(f, "found a {kind} run"),
            ClassifyReason::ManyTags => {
                write!(f, "found at least {MARKUP_TAG_THRESHOLD} start tags")
            }
            ClassifyReason::NoTags => f.write_str("no start tags found"),
            ClassifyReason::TagsOutsideStrings(n) => {
                write!(f, "{n} start tag(s) outside string literals")
            }
            ClassifyReason::AllTagsInStrings(n) => {
                write!(f, "all {n} start tag(s) are inside string literals")
            }
        }
    }
}

/// The classification decision and why it was made.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    pub kind: DocumentKind,
    pub reason: ClassifyReason,
}

impl Classification {
    fn markup(reason: ClassifyReason) -> Self {
        Classification {
            kind: DocumentKind::Markup,
            reason,
        }
    }

    fn data(reason: ClassifyReason) -> Self {
        Classification {
            kind: DocumentKind::Data,
            reason,
        }
    }
}

/// Decide whether `content`, segmented into `runs`, is markup.
#[tracing::instrument(level = "debug", skip_all, fields(runs = runs.len()))]
pub fn classify_document(content: &str, runs: &[Run], config: &EscapeConfig) -> Classification {
    if let Some(kind) = config.document_override {
        return Classification {
            kind,
            reason: ClassifyReason::Override,
        };
    }

    let mut tags: Vec<&str> = Vec::new();
    for (i, run) in runs.iter().enumerate() {
        match run.kind {
            RunKind::Xml | RunKind::ScriptStart | RunKind::ScriptEnd => {
                return Classification::markup(ClassifyReason::StructuralRun(run.kind));
            }
            RunKind::TagStart => {
                if i > 0 && follows_quote(content, &runs[i - 1]) {
                    continue;
                }
                tags.push(run.text(content));
                if tags.len() >= MARKUP_TAG_THRESHOLD {
                    return Classification::markup(ClassifyReason::ManyTags);
                }
            }
            _ => {}
        }
    }
    if tags.is_empty() {
        return Classification::data(ClassifyReason::NoTags);
    }

    let total = tags.len();
    for token in tokenize(content, &config.delimiters) {
        if tags.is_empty() {
            break;
        }
        if token.kind == TokenKind::String {
            tags = unmatched_tags(token.text(content), tags);
        }
    }
    if tags.is_empty() {
        Classification::data(ClassifyReason::AllTagsInStrings(total))
    } else {
        Classification::markup(ClassifyReason::TagsOutsideStrings(tags.len()))
    }
}

/// Content ending in a quote right before a tag means the tag is most
/// likely inside a string.
fn follows_quote(content: &str, previous: &Run) -> bool {
    previous.kind == RunKind::Content
        && previous
            .text(content)
            .trim()
            .ends_with(|c: char| c == '"' || c == '\'')
}

/// Match each tag at a distinct position of `literal`; return the tags
/// left over.
fn unmatched_tags<'s>(literal: &str, tags: Vec<&'s str>) -> Vec<&'s str> {
    let mut taken: Vec<usize> = Vec::new();
    let mut left = Vec::new();
    for tag in tags {
        let mut from = 0;
        loop {
            match literal.get(from..).and_then(|rest| rest.find(tag)) {
                Some(rel) if taken.contains(&(from + rel)) => from += rel + tag.len(),
                Some(rel) => {
                    taken.push(from + rel);
                    break;
                }
                None => {
                    left.push(tag);
                    break;
                }
            }
        }
    }
    left
}

#[cfg(test)]
mod tests;
