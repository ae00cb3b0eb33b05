//! Whole-file segmentation into typed runs.
//!
//! A bounded tag scanner, not an HTML parser: it recognizes comments,
//! doctypes, XML sections, start and end tags, and the raw text of
//! `<script>` and `<style>` elements. Everything else is `Content`.
//! Template spans are opaque everywhere, so a `>` or a quote inside
//! `<& ... &>` never ends a tag or an attribute value.
//!
//! The runs cover the input exactly, in order, without gaps.

use esc_diagnostic::Span;
use esc_lexer_core::{eat_template_span, Cursor, Delimiters, SourceBuffer};

use crate::{Run, RunKind};

/// Split `content` into runs.
pub fn segment(content: &str, delimiters: &Delimiters) -> Vec<Run> {
    let buf = SourceBuffer::new(content);
    let mut segmenter = Segmenter {
        cursor: buf.cursor(),
        delimiters,
        runs: Vec::new(),
        content_start: 0,
    };
    segmenter.run();
    segmenter.runs
}

/// Elements whose body is raw text rather than markup.
#[derive(Copy, Clone)]
enum RawElement {
    Script,
    Style,
}

impl RawElement {
    fn close_tag(self) -> &'static [u8] {
        match self {
            RawElement::Script => b"</script",
            RawElement::Style => b"</style",
        }
    }

    fn kinds(self) -> (RunKind, RunKind, RunKind) {
        match self {
            RawElement::Script => (
                RunKind::ScriptStart,
                RunKind::ScriptContent,
                RunKind::ScriptEnd,
            ),
            RawElement::Style => (
                RunKind::StyleStart,
                RunKind::StyleContent,
                RunKind::StyleEnd,
            ),
        }
    }
}

struct Segmenter<'a> {
    cursor: Cursor<'a>,
    delimiters: &'a Delimiters,
    runs: Vec<Run>,
    /// Start of the pending `Content` run.
    content_start: u32,
}

impl Segmenter<'_> {
    fn run(&mut self) {
        let left = self.delimiters.left.as_bytes().first().copied().unwrap_or(b'<');
        loop {
            self.cursor.skip_to_any3(b'<', left, left);
            if self.cursor.is_eof() {
                break;
            }
            if eat_template_span(&mut self.cursor, self.delimiters).is_some() {
                continue;
            }
            let start = self.cursor.pos();
            match self.markup(start) {
                Some(RunKind::ScriptStart) => self.raw_element(start, RawElement::Script),
                Some(RunKind::StyleStart) => self.raw_element(start, RawElement::Style),
                Some(kind) => self.push_markup(kind, start),
                None => self.cursor.advance_char(),
            }
        }
        self.flush_content(self.cursor.pos());
    }

    /// Recognize and consume a markup construct starting with `<`.
    ///
    /// Leaves the cursor untouched and returns `None` for a `<` that starts
    /// nothing, such as `a < b`.
    fn markup(&mut self, start: u32) -> Option<RunKind> {
        let c = &mut self.cursor;
        if c.current() != b'<' {
            return None;
        }
        if c.starts_with(b"<!--") {
            c.advance_n(4);
            if c.eat_until_seq(b"-->") {
                c.advance_n(3);
            }
            return Some(RunKind::Comment);
        }
        if c.starts_with(b"<![CDATA[") {
            c.advance_n(9);
            if c.eat_until_seq(b"]]>") {
                c.advance_n(3);
            }
            return Some(RunKind::Xml);
        }
        if c.starts_with(b"<?") {
            c.advance_n(2);
            if c.eat_until_seq(b"?>") {
                c.advance_n(2);
            }
            return Some(RunKind::Xml);
        }
        if c.starts_with_ignore_case(b"<!doctype") {
            self.eat_tag_rest();
            return Some(RunKind::Doctype);
        }
        if c.peek() == b'/' {
            c.advance_n(2);
            if !c.current().is_ascii_alphabetic() {
                c.seek(start);
                return None;
            }
            self.eat_tag_rest();
            return Some(RunKind::TagEnd);
        }
        if !c.peek().is_ascii_alphabetic() {
            return None;
        }
        c.advance();
        let name_start = c.pos();
        c.eat_while(is_tag_name_byte);
        let name = c.slice_from(name_start);
        let raw = if name.eq_ignore_ascii_case("script") {
            Some(RawElement::Script)
        } else if name.eq_ignore_ascii_case("style") {
            Some(RawElement::Style)
        } else {
            None
        };
        self.eat_tag_rest();
        let self_closing = self.cursor.slice_from(start).ends_with("/>");
        Some(match raw {
            Some(element) if !self_closing => element.kinds().0,
            _ => RunKind::TagStart,
        })
    }

    /// Consume the rest of a tag through its closing `>`.
    ///
    /// Quotes only matter after `=`, so a stray apostrophe in a tag body
    /// cannot swallow the rest of the file.
    fn eat_tag_rest(&mut self) {
        loop {
            if self.cursor.is_eof() {
                return;
            }
            if eat_template_span(&mut self.cursor, self.delimiters).is_some() {
                continue;
            }
            match self.cursor.current() {
                b'>' => {
                    self.cursor.advance();
                    return;
                }
                b'=' => {
                    self.cursor.advance();
                    self.cursor.eat_while(is_space);
                    let quote = self.cursor.current();
                    if quote == b'"' || quote == b'\'' {
                        eat_quoted(&mut self.cursor, self.delimiters, quote);
                    }
                }
                _ => self.cursor.advance_char(),
            }
        }
    }

    /// A `<script>` or `<style>` start tag has been consumed from `start`;
    /// split off its raw body and its end tag.
    fn raw_element(&mut self, start: u32, element: RawElement) {
        let (start_kind, content_kind, end_kind) = element.kinds();
        self.push_markup(start_kind, start);

        let left = self.delimiters.left.as_bytes().first().copied().unwrap_or(b'<');
        loop {
            self.cursor.skip_to_any3(b'<', left, left);
            if self.cursor.is_eof() {
                break;
            }
            if eat_template_span(&mut self.cursor, self.delimiters).is_some() {
                continue;
            }
            if self.cursor.starts_with_ignore_case(element.close_tag()) {
                break;
            }
            self.cursor.advance();
        }

        let body_start = self.content_start;
        let body_end = self.cursor.pos();
        if body_end > body_start {
            self.runs
                .push(Run::new(content_kind, Span::new(body_start, body_end)));
        }
        self.content_start = body_end;
        if self.cursor.is_eof() {
            return;
        }
        self.cursor.advance_n(2);
        self.eat_tag_rest();
        self.push_markup(end_kind, body_end);
    }

    /// Close any pending content and push a markup run ending at the cursor.
    fn push_markup(&mut self, kind: RunKind, start: u32) {
        self.flush_content(start);
        let end = self.cursor.pos();
        self.runs.push(Run::new(kind, Span::new(start, end)));
        self.content_start = end;
    }

    fn flush_content(&mut self, end: u32) {
        if end > self.content_start {
            self.runs.push(Run::new(
                RunKind::Content,
                Span::new(self.content_start, end),
            ));
        }
        self.content_start = end;
    }
}

/// Consume a quoted attribute value, opening quote included. Template
/// spans inside it are opaque. An unclosed value ends at EOF.
pub(crate) fn eat_quoted(cursor: &mut Cursor<'_>, delimiters: &Delimiters, quote: u8) {
    cursor.advance();
    loop {
        if cursor.is_eof() {
            return;
        }
        if eat_template_span(cursor, delimiters).is_some() {
            continue;
        }
        if cursor.current() == quote {
            cursor.advance();
            return;
        }
        cursor.advance_char();
    }
}

#[inline]
pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')
}

#[inline]
fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b':' | b'_')
}

#[cfg(test)]
mod tests;
