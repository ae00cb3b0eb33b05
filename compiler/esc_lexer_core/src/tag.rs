//! Token kinds and the raw token produced by the script scanner.

/// Classification of a script token.
///
/// `#[repr(u8)]` keeps [`RawToken`] small; the discriminants carry no
/// meaning beyond identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    /// A complete template interpolation span, delimiters included.
    TplDelimiter,
    /// `(` or `[`.
    StartExpr,
    /// `)` or `]`.
    EndExpr,
    /// `{`.
    StartBlock,
    /// `}`.
    EndBlock,
    /// `;`.
    Semicolon,
    /// Identifier, keyword, number or sharp variable (`#1=`).
    Word,
    /// Punctuation operator, including the keyword operator `in`.
    Operator,
    /// A bare `=`.
    Equals,
    /// `// ...` up to, not including, the line break.
    LineComment,
    /// `/* ... */` without line breaks.
    InlineComment,
    /// `/* ... */` spanning more than one line.
    BlockComment,
    /// `/*@cc_on ... */` conditional compilation comment.
    IeConditional,
    /// Single- or double-quoted string literal.
    String,
    /// Regular expression literal with its flags.
    Regexp,
    /// Run of spaces and tabs.
    Whitespace,
    /// `\n`.
    Newline,
    /// Any other character, one at a time.
    Normal,
    /// End of input. Always zero-length.
    Eof,
}

impl TokenKind {
    /// Human-readable name, used by the `tokens` debug command.
    pub fn name(self) -> &'static str {
        match self {
            Self::TplDelimiter => "tpl-delimiter",
            Self::StartExpr => "start-expr",
            Self::EndExpr => "end-expr",
            Self::StartBlock => "start-block",
            Self::EndBlock => "end-block",
            Self::Semicolon => "semicolon",
            Self::Word => "word",
            Self::Operator => "operator",
            Self::Equals => "equals",
            Self::LineComment => "line-comment",
            Self::InlineComment => "inline-comment",
            Self::BlockComment => "block-comment",
            Self::IeConditional => "ie-conditional",
            Self::String => "string",
            Self::Regexp => "regexp",
            Self::Whitespace => "whitespace",
            Self::Newline => "newline",
            Self::Normal => "normal",
            Self::Eof => "eof",
        }
    }

    /// Returns `true` for tokens that carry no program meaning.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace
                | Self::Newline
                | Self::LineComment
                | Self::InlineComment
                | Self::BlockComment
                | Self::IeConditional
        )
    }

    /// Returns `true` if a `/` following a token of this kind begins a
    /// regular expression literal rather than a division.
    pub fn allows_regex_after(self) -> bool {
        matches!(
            self,
            Self::StartExpr
                | Self::StartBlock
                | Self::EndBlock
                | Self::Operator
                | Self::Equals
                | Self::Semicolon
        )
    }
}

/// A token produced by the script scanner.
///
/// Carries its byte range rather than its text; use [`RawToken::text`] to
/// view it against the source it was scanned from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawToken {
    pub kind: TokenKind,
    /// Byte offset of the first byte of the token.
    pub start: u32,
    /// Length in bytes. Zero only for [`TokenKind::Eof`].
    pub len: u32,
}

impl RawToken {
    /// Byte offset one past the end of the token.
    #[inline]
    pub fn end(&self) -> u32 {
        self.start + self.len
    }

    /// The token's text within `source`.
    ///
    /// `source` must be the text the token was scanned from.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.start as usize..self.end() as usize]
    }
}
