//! Attribute extraction for a single start tag.

use esc_diagnostic::Span;
use esc_lexer_core::{eat_template_span, Cursor, Delimiters, SourceBuffer};

use crate::segmenter::{eat_quoted, is_space};

/// One attribute of a tag. Spans are relative to the tag text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: Span,
    /// The value, quotes included; `None` for a bare attribute.
    pub value: Option<Span>,
}

impl Attribute {
    pub fn name_text<'s>(&self, tag: &'s str) -> &'s str {
        self.name.slice(tag)
    }

    pub fn value_text<'s>(&self, tag: &'s str) -> Option<&'s str> {
        self.value.map(|v| v.slice(tag))
    }
}

/// The name and attributes of a tag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagInfo {
    /// As written; compare case-insensitively.
    pub name: String,
    pub attributes: Vec<Attribute>,
}

/// Parse the text of one tag run (`<a href="x" <&$attrs&>>`).
///
/// A template span standing where an attribute name would be becomes a
/// bare attribute, so `<&$attrs&>` above is checked like any other name.
pub fn parse_tag(text: &str, delimiters: &Delimiters) -> TagInfo {
    let buf = SourceBuffer::new(text);
    let mut cursor = buf.cursor();
    if cursor.current() == b'<' {
        cursor.advance();
    }
    if cursor.current() == b'/' {
        cursor.advance();
    }

    let name_start = cursor.pos();
    eat_name(&mut cursor, delimiters, |b| b == b'/');
    let name = cursor.slice_from(name_start).to_owned();

    let mut attributes = Vec::new();
    loop {
        cursor.eat_while(|b| is_space(b) || b == b'/');
        if cursor.is_eof() || cursor.current() == b'>' {
            break;
        }

        let start = cursor.pos();
        eat_name(&mut cursor, delimiters, |b| b == b'=');
        let end = cursor.pos();
        if end == start {
            // A stray `=` or `/>` fragment; step over it.
            cursor.advance_char();
            continue;
        }

        let before_value = cursor;
        cursor.eat_while(is_space);
        let value = if cursor.current() == b'=' {
            cursor.advance();
            cursor.eat_while(is_space);
            let value_start = cursor.pos();
            eat_value(&mut cursor, delimiters);
            Some(Span::new(value_start, cursor.pos()))
        } else {
            cursor = before_value;
            None
        };
        attributes.push(Attribute {
            name: Span::new(start, end),
            value,
        });
    }

    TagInfo { name, attributes }
}

/// Consume a tag or attribute name. Stops at whitespace, `>`, `/>` and any
/// byte for which `stop` holds; template spans are part of the name.
fn eat_name(cursor: &mut Cursor<'_>, delimiters: &Delimiters, stop: impl Fn(u8) -> bool) {
    loop {
        if cursor.is_eof() {
            return;
        }
        if eat_template_span(cursor, delimiters).is_some() {
            continue;
        }
        let b = cursor.current();
        if is_space(b) || b == b'>' || stop(b) || (b == b'/' && cursor.peek() == b'>') {
            return;
        }
        cursor.advance_char();
    }
}

fn eat_value(cursor: &mut Cursor<'_>, delimiters: &Delimiters) {
    let quote = cursor.current();
    if quote == b'"' || quote == b'\'' {
        eat_quoted(cursor, delimiters, quote);
        return;
    }
    loop {
        if cursor.is_eof() {
            return;
        }
        if eat_template_span(cursor, delimiters).is_some() {
            continue;
        }
        let b = cursor.current();
        if is_space(b) || b == b'>' {
            return;
        }
        cursor.advance_char();
    }
}

#[cfg(test)]
mod tests;
