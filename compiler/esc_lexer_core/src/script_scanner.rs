//! Tokenizer for script embedded in template files.
//!
//! Produces [`RawToken`]s that cover the input left to right with no
//! overlap. The only bytes not covered are `\r` outside of strings,
//! comments, regex literals and template spans. Template spans are
//! recognized before anything else at every position and stay whole even
//! when they sit inside a string or regex literal.
//!
//! # Regex disambiguation
//!
//! A `/` that does not open a comment starts a regex literal only when the
//! previous significant token leaves the scanner expecting an operand: no
//! token yet, the words `return`/`to`, or one of the kinds listed by
//! [`TokenKind::allows_regex_after`]. Whitespace, newlines and comments do
//! not change the expectation.

use crate::delimiter::eat_template_span;
use crate::tag::{RawToken, TokenKind};
use crate::{Cursor, Delimiters, SourceBuffer};

/// Streaming script tokenizer over a sentinel-terminated cursor.
pub struct ScriptScanner<'a> {
    cursor: Cursor<'a>,
    delimiters: &'a Delimiters,
    /// Whether a `/` at the current position may open a regex literal.
    regex_allowed: bool,
}

impl<'a> ScriptScanner<'a> {
    pub fn new(cursor: Cursor<'a>, delimiters: &'a Delimiters) -> Self {
        Self {
            cursor,
            delimiters,
            regex_allowed: true,
        }
    }

    /// Produce the next token.
    ///
    /// Returns [`TokenKind::Eof`] with `len == 0` once the input is
    /// exhausted, and keeps returning it on further calls.
    pub fn next_token(&mut self) -> RawToken {
        while self.cursor.current() == b'\r' && !self.cursor.is_eof() {
            self.cursor.advance();
        }
        let start = self.cursor.pos();
        if self.cursor.is_eof() {
            return RawToken {
                kind: TokenKind::Eof,
                start,
                len: 0,
            };
        }

        let tok = self.scan(start);
        if !tok.kind.is_trivia() {
            self.regex_allowed = tok.kind.allows_regex_after()
                || (tok.kind == TokenKind::Word
                    && matches!(self.cursor.slice(tok.start, tok.end()), "return" | "to"));
        }
        tok
    }

    fn scan(&mut self, start: u32) -> RawToken {
        if eat_template_span(&mut self.cursor, self.delimiters).is_some() {
            return self.token(TokenKind::TplDelimiter, start);
        }
        match self.cursor.current() {
            b'\n' => self.single(start, TokenKind::Newline),
            b' ' | b'\t' => {
                self.cursor.eat_while(|b| b == b' ' || b == b'\t');
                self.token(TokenKind::Whitespace, start)
            }
            b'(' | b'[' => self.single(start, TokenKind::StartExpr),
            b')' | b']' => self.single(start, TokenKind::EndExpr),
            b'{' => self.single(start, TokenKind::StartBlock),
            b'}' => self.single(start, TokenKind::EndBlock),
            b';' => self.single(start, TokenKind::Semicolon),
            b'/' => self.slash(start),
            quote @ (b'"' | b'\'') => self.string(start, quote),
            b'#' if self.cursor.peek().is_ascii_digit() => self.sharp_variable(start),
            b if is_word_byte(b) => self.word(start),
            b if is_operator(&[b]) => self.operator(start),
            _ => {
                self.cursor.advance_char();
                self.token(TokenKind::Normal, start)
            }
        }
    }

    #[inline]
    fn token(&self, kind: TokenKind, start: u32) -> RawToken {
        RawToken {
            kind,
            start,
            len: self.cursor.pos() - start,
        }
    }

    #[inline]
    fn single(&mut self, start: u32, kind: TokenKind) -> RawToken {
        self.cursor.advance();
        self.token(kind, start)
    }

    // ─── Words & Numbers ─────────────────────────────────────────────

    fn word(&mut self, start: u32) -> RawToken {
        self.cursor.eat_while(is_word_byte);

        // Decimal point: `12.5` is one word, `a.b` is three tokens.
        if self.cursor.current() == b'.'
            && self.cursor.peek().is_ascii_digit()
            && self.cursor.slice_from(start).bytes().all(|b| b.is_ascii_digit())
        {
            self.cursor.advance();
            self.cursor.eat_while(is_word_byte);
        }

        // Signed exponent: `1.5e-3`, `2E+10`.
        if matches!(self.cursor.current(), b'+' | b'-')
            && self.cursor.peek().is_ascii_digit()
            && is_exponent_prefix(self.cursor.slice_from(start))
        {
            self.cursor.advance();
            self.cursor.eat_while(is_word_byte);
        }

        let kind = if self.cursor.slice_from(start) == "in" {
            TokenKind::Operator
        } else {
            TokenKind::Word
        };
        self.token(kind, start)
    }

    /// `#1=` or `#1#`, optionally followed by `[]` or `{}`.
    fn sharp_variable(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // '#'
        self.cursor.eat_while(|b| b.is_ascii_digit());
        if matches!(self.cursor.current(), b'#' | b'=') {
            self.cursor.advance();
        }
        if matches!(self.cursor.window(2), b"[]" | b"{}") {
            self.cursor.advance_n(2);
        }
        self.token(TokenKind::Word, start)
    }

    // ─── Slash: Comments, Regex, Division ────────────────────────────

    fn slash(&mut self, start: u32) -> RawToken {
        match self.cursor.peek() {
            b'/' => {
                self.cursor.eat_until_line_break();
                self.token(TokenKind::LineComment, start)
            }
            b'*' => self.block_comment(start),
            _ if self.regex_allowed => self.regex(start),
            _ => self.operator(start),
        }
    }

    fn block_comment(&mut self, start: u32) -> RawToken {
        self.cursor.advance_n(2); // "/*"
        let body_start = self.cursor.pos();
        let closed = self.cursor.eat_until_seq(b"*/");
        let body = self.cursor.slice_from(body_start);
        if closed {
            self.cursor.advance_n(2);
        }

        let kind = if body.starts_with("@cc_on") {
            TokenKind::IeConditional
        } else if body.contains(|c: char| c == '\r' || c == '\n') {
            TokenKind::BlockComment
        } else {
            TokenKind::InlineComment
        };
        self.token(kind, start)
    }

    fn regex(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // opening '/'
        let mut in_class = false;
        while !self.cursor.is_eof() {
            if eat_template_span(&mut self.cursor, self.delimiters).is_some() {
                continue;
            }
            match self.cursor.current() {
                b'\\' => {
                    self.cursor.advance();
                    if !self.cursor.is_eof() {
                        self.cursor.advance_char();
                    }
                }
                b'[' => {
                    in_class = true;
                    self.cursor.advance();
                }
                b']' if in_class => {
                    in_class = false;
                    self.cursor.advance();
                }
                b'/' if !in_class => {
                    self.cursor.advance();
                    self.cursor.eat_while(is_word_byte); // flags
                    break;
                }
                _ => self.cursor.advance_char(),
            }
        }
        self.token(TokenKind::Regexp, start)
    }

    // ─── Strings ─────────────────────────────────────────────────────

    fn string(&mut self, start: u32, quote: u8) -> RawToken {
        self.cursor.advance(); // opening quote
        let lead = self.delimiters.left.as_bytes().first().copied().unwrap_or(quote);
        loop {
            let b = self.cursor.skip_to_any3(quote, b'\\', lead);
            if self.cursor.is_eof() {
                break;
            }
            if eat_template_span(&mut self.cursor, self.delimiters).is_some() {
                continue;
            }
            if b == quote {
                self.cursor.advance();
                break;
            }
            if b == b'\\' {
                self.cursor.advance();
                if !self.cursor.is_eof() {
                    self.cursor.advance_char();
                }
            } else {
                self.cursor.advance_char();
            }
        }
        self.token(TokenKind::String, start)
    }

    // ─── Operators ───────────────────────────────────────────────────

    /// Longest operator that can be built by extending one byte at a time.
    fn operator(&mut self, start: u32) -> RawToken {
        let mut len: u32 = 1;
        while len < MAX_OPERATOR_LEN && is_operator(self.cursor.window(len as usize + 1)) {
            len += 1;
        }
        let kind = if self.cursor.current() == b'=' && len == 1 {
            TokenKind::Equals
        } else {
            TokenKind::Operator
        };
        self.cursor.advance_n(len);
        self.token(kind, start)
    }
}

impl Iterator for ScriptScanner<'_> {
    type Item = RawToken;

    fn next(&mut self) -> Option<RawToken> {
        let tok = self.next_token();
        if tok.kind == TokenKind::Eof {
            None
        } else {
            Some(tok)
        }
    }
}

const MAX_OPERATOR_LEN: u32 = 4;

fn is_operator(bytes: &[u8]) -> bool {
    matches!(
        bytes,
        b"+" | b"-"
            | b"*"
            | b"/"
            | b"%"
            | b"&"
            | b"++"
            | b"--"
            | b"="
            | b"+="
            | b"-="
            | b"*="
            | b"/="
            | b"%="
            | b"=="
            | b"==="
            | b"!="
            | b"!=="
            | b">"
            | b"<"
            | b">="
            | b"<="
            | b">>"
            | b"<<"
            | b">>>"
            | b">>>="
            | b">>="
            | b"<<="
            | b"&&"
            | b"&="
            | b"|"
            | b"||"
            | b"!"
            | b"!!"
            | b","
            | b":"
            | b"?"
            | b"^"
            | b"^="
            | b"|="
            | b"::"
    )
}

/// `true` for ASCII letters, digits and `_`.
#[inline]
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// `true` for `12e`, `1.5E`: digits with an optional decimal point,
/// ending in an exponent marker.
fn is_exponent_prefix(text: &str) -> bool {
    let bytes = text.as_bytes();
    match bytes.split_last() {
        Some((&(b'e' | b'E'), mantissa)) => {
            mantissa.first().is_some_and(u8::is_ascii_digit)
                && mantissa.iter().all(|&b| b.is_ascii_digit() || b == b'.')
        }
        _ => false,
    }
}

/// Tokenize `source` and collect every token except the final `Eof`.
pub fn tokenize(source: &str, delimiters: &Delimiters) -> Vec<RawToken> {
    let buf = SourceBuffer::new(source);
    ScriptScanner::new(buf.cursor(), delimiters).collect()
}
