//! Text edits attached to diagnostics and consumed by the patcher.

use serde::Serialize;

use crate::Span;

/// A single replacement of `span` with `new_text`.
///
/// An insertion is a replacement of an empty span; deletions have empty
/// `new_text`.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub struct TextEdit {
    pub span: Span,
    pub new_text: String,
}

impl TextEdit {
    pub fn delete(span: Span) -> Self {
        TextEdit {
            span,
            new_text: String::new(),
        }
    }

    pub fn replace(span: Span, text: impl Into<String>) -> Self {
        TextEdit {
            span,
            new_text: text.into(),
        }
    }

    /// The same edit with its span moved forward by `base` bytes.
    #[must_use]
    pub fn shifted(&self, base: u32) -> Self {
        TextEdit {
            span: self.span.shift(base),
            new_text: self.new_text.clone(),
        }
    }
}

/// A suggested fix: a message plus the edits that implement it.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub struct Suggestion {
    pub message: String,
    pub edits: Vec<TextEdit>,
}

impl Suggestion {
    pub fn new(message: impl Into<String>, edit: TextEdit) -> Self {
        Suggestion {
            message: message.into(),
            edits: vec![edit],
        }
    }
}

#[cfg(test)]
mod tests;
