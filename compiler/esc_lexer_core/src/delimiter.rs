//! Template delimiter recognition.
//!
//! A template span starts with the left delimiter and ends at the right
//! delimiter that brings the nesting depth back to zero, so
//! `<& $a <& $b &> &>` is one span. A delimiter directly after an
//! unescaped backslash is ordinary text. Running out of input inside a
//! span is not an error: the span simply ends at EOF.

use crate::{Cursor, SourceBuffer};

/// The configured pair of template delimiters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Delimiters {
    pub left: String,
    pub right: String,
}

impl Delimiters {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Returns `false` if either delimiter is empty, in which case no
    /// template spans are recognized at all.
    pub fn is_enabled(&self) -> bool {
        !self.left.is_empty() && !self.right.is_empty()
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "delimiters are short configuration strings"
    )]
    pub(crate) fn left_len(&self) -> u32 {
        self.left.len() as u32
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "delimiters are short configuration strings"
    )]
    pub(crate) fn right_len(&self) -> u32 {
        self.right.len() as u32
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::new("<&", "&>")
    }
}

/// How a template span ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpanEnd {
    /// The outermost right delimiter was found.
    Closed,
    /// Input ran out first.
    Unterminated,
}

/// Try to consume a template span at the cursor.
///
/// Returns `None`, leaving the cursor untouched, if the left delimiter
/// does not start here. Otherwise the cursor is left just past the span.
pub fn eat_template_span(cursor: &mut Cursor<'_>, delims: &Delimiters) -> Option<SpanEnd> {
    if !delims.is_enabled() || !cursor.starts_with(delims.left.as_bytes()) {
        return None;
    }
    let left = delims.left.as_bytes();
    let right = delims.right.as_bytes();
    cursor.advance_n(delims.left_len());

    let mut depth: u32 = 1;
    loop {
        let b = cursor.skip_to_any3(b'\\', right[0], left[0]);
        if cursor.is_eof() {
            return Some(SpanEnd::Unterminated);
        }
        if cursor.starts_with(right) {
            cursor.advance_n(delims.right_len());
            depth -= 1;
            if depth == 0 {
                return Some(SpanEnd::Closed);
            }
        } else if cursor.starts_with(left) {
            cursor.advance_n(delims.left_len());
            depth += 1;
        } else if b == b'\\' {
            cursor.advance();
            if !cursor.is_eof() {
                cursor.advance_char();
            }
        } else {
            cursor.advance_char();
        }
    }
}

/// A template span located within a larger text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TemplateSpan {
    pub start: u32,
    pub end: u32,
    pub closed: bool,
}

impl TemplateSpan {
    /// The whole span, delimiters included.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.start as usize..self.end as usize]
    }

    /// Byte range of the payload between the delimiters.
    ///
    /// An unterminated span has no right delimiter to strip.
    pub fn payload_range(&self, delims: &Delimiters) -> (u32, u32) {
        let start = self.start + delims.left_len();
        let end = if self.closed {
            self.end - delims.right_len()
        } else {
            self.end
        };
        (start, end.max(start))
    }

    pub fn payload<'s>(&self, source: &'s str, delims: &Delimiters) -> &'s str {
        let (start, end) = self.payload_range(delims);
        &source[start as usize..end as usize]
    }
}

/// Find every outermost template span in `text`, in order.
pub fn find_template_spans(text: &str, delims: &Delimiters) -> Vec<TemplateSpan> {
    let mut spans = Vec::new();
    if !delims.is_enabled() {
        return spans;
    }
    let buf = SourceBuffer::new(text);
    let mut cursor = buf.cursor();
    while cursor.eat_until_seq(delims.left.as_bytes()) {
        let start = cursor.pos();
        match eat_template_span(&mut cursor, delims) {
            Some(end) => spans.push(TemplateSpan {
                start,
                end: cursor.pos(),
                closed: end == SpanEnd::Closed,
            }),
            None => cursor.advance_char(),
        }
    }
    spans
}

#[cfg(test)]
mod tests;
