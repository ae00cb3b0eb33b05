//! Diagnostic Emitters
//!
//! - Terminal: colored, human-readable output with source snippets
//! - JSON: machine-readable output for editors and CI
//!
//! Both implement [`DiagnosticEmitter`]. Spans are resolved against the
//! file announced by the most recent [`DiagnosticEmitter::begin_file`].

mod json;
mod terminal;

pub use json::JsonEmitter;
pub use terminal::{ColorMode, TerminalEmitter};

use crate::span_utils::LineOffsetTable;
use crate::Diagnostic;

/// Trait for emitting diagnostics in various formats.
pub trait DiagnosticEmitter {
    /// Switch to a new file; later spans refer to `source`.
    fn begin_file(&mut self, path: &str, source: &str);

    /// Emit a single diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Emit multiple diagnostics.
    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Emit a summary line counting the violations.
    fn emit_summary(&mut self, error_count: usize);
}

/// The file diagnostics are currently being reported against.
#[derive(Clone, Debug)]
pub(crate) struct FileContext {
    pub(crate) path: String,
    pub(crate) source: String,
    pub(crate) lines: LineOffsetTable,
}

impl FileContext {
    pub(crate) fn new(path: &str, source: &str) -> Self {
        FileContext {
            path: path.to_owned(),
            source: source.to_owned(),
            lines: LineOffsetTable::build(source),
        }
    }

    pub(crate) fn line_col(&self, offset: u32) -> (u32, u32) {
        self.lines.offset_to_line_col(&self.source, offset)
    }

    /// Text of the 1-based `line`, without its line terminator.
    pub(crate) fn line_text(&self, line: u32) -> &str {
        self.source
            .lines()
            .nth(line.saturating_sub(1) as usize)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests;
