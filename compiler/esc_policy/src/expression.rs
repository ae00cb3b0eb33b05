//! Interpolated expressions and their modifier chains.
//!
//! `<& $user.name|default:"a|b"|e_html &>` is one expression with value
//! `user.name|default:"a|b"|e_html` and two modifiers, `default:"a|b"`
//! and `e_html`. The chain splits at `|` outside quotes; `||` is a
//! logical operator, not a separator.

use esc_diagnostic::{to_offset, Span};
use esc_lexer_core::{find_template_spans, Delimiters};

/// One `|name:args` segment of a modifier chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Modifier {
    /// From the `|` to the end of the segment, relative to the sentence.
    pub span: Span,
    /// The segment without its `|`, trimmed.
    pub text: String,
}

impl Modifier {
    /// The part before the first `:`.
    pub fn name(&self) -> &str {
        self.text.split(':').next().unwrap_or("").trim()
    }

    /// Whether this segment is the configured modifier `configured`.
    ///
    /// `escape:html` only matches `escape:html`; a bare `e_html` also
    /// matches `e_html:arg`.
    pub fn matches(&self, configured: &str) -> bool {
        self.text == configured || (!configured.contains(':') && self.name() == configured)
    }
}

/// A closed template span whose payload starts with `$`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expression {
    /// The whole template span, delimiters included.
    pub span: Span,
    /// The trimmed payload, from `$` to its last non-space character.
    pub body: Span,
    /// The body without `$`, with `\"` unescaped.
    pub value: String,
    pub modifiers: Vec<Modifier>,
    /// The chain ends inside an open quote or on a dangling `|`. A
    /// modifier appended to it would not parse as one, so the expression
    /// is reported but never rewritten.
    pub unterminated: bool,
}

impl Expression {
    pub fn has_modifier(&self, configured: &str) -> bool {
        self.modifiers.iter().any(|m| m.matches(configured))
    }

    pub fn body_text<'s>(&self, sentence: &'s str) -> &'s str {
        self.body.slice(sentence)
    }
}

/// Every interpolated expression in `sentence`, in order. Spans are
/// relative to `sentence`.
pub fn find_expressions(sentence: &str, delimiters: &Delimiters) -> Vec<Expression> {
    find_template_spans(sentence, delimiters)
        .into_iter()
        .filter(|span| span.closed)
        .filter_map(|span| {
            let (payload_start, _) = span.payload_range(delimiters);
            let payload = span.payload(sentence, delimiters);
            let trimmed = payload.trim_start();
            if !trimmed.starts_with('$') {
                return None;
            }
            let body = trimmed.trim_end();
            let start = payload_start + to_offset(payload.len() - trimmed.len());
            let body_span = Span::new(start, start + to_offset(body.len()));
            let (modifiers, unterminated) = parse_modifiers(body, start);
            Some(Expression {
                span: Span::new(span.start, span.end),
                body: body_span,
                value: body[1..].trim().replace("\\\"", "\""),
                modifiers,
                unterminated,
            })
        })
        .collect()
}

/// Split `body` at top-level `|`; `base` is the body's offset in the
/// sentence. The flag is set when the chain is left unterminated.
fn parse_modifiers(body: &str, base: u32) -> (Vec<Modifier>, bool) {
    let bytes = body.as_bytes();
    let mut bars = Vec::new();
    let mut quote: Option<u8> = None;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(_) if b == b'\\' => i += 1,
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'"' | b'\'' => quote = Some(b),
                b'|' if bytes.get(i + 1) == Some(&b'|') => i += 1,
                b'|' => bars.push(i),
                _ => {}
            },
        }
        i += 1;
    }

    let modifiers = bars
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = bars.get(n + 1).copied().unwrap_or(bytes.len());
            Modifier {
                span: Span::new(base + to_offset(start), base + to_offset(end)),
                text: body[start + 1..end].trim().to_owned(),
            }
        })
        .collect();
    (modifiers, quote.is_some() || body.ends_with('|'))
}
