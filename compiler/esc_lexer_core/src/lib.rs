//! Low-level scanning for template files.
//!
//! This crate knows nothing about escaping policy. It provides:
//!
//! - [`SourceBuffer`] / [`Cursor`]: a sentinel-terminated byte buffer and a
//!   copyable cursor over it.
//! - [`Delimiters`] and the delimiter scanner ([`eat_template_span`],
//!   [`find_template_spans`]): recognition of nested template
//!   interpolation spans such as `<& $user.name &>`.
//! - [`ScriptScanner`]: a tokenizer for embedded script that keeps template
//!   spans intact, even inside string and regex literals.
//!
//! # Scanning model
//!
//! ```text
//! &str ──► SourceBuffer ──► Cursor ──► ScriptScanner ──► RawToken*
//!                                 └──► eat_template_span
//! ```
//!
//! Nothing here is fatal: unterminated strings, comments, regexes and
//! template spans come back as partial tokens ending at EOF.

mod cursor;
mod delimiter;
mod script_scanner;
mod source_buffer;
mod tag;

pub use cursor::Cursor;
pub use delimiter::{eat_template_span, find_template_spans, Delimiters, SpanEnd, TemplateSpan};
pub use script_scanner::{tokenize, ScriptScanner};
pub use source_buffer::{SourceBuffer, MAX_SOURCE_LEN};
pub use tag::{RawToken, TokenKind};
