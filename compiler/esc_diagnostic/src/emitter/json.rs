//! JSON Emitter
//!
//! Machine-readable diagnostic output: one JSON array holding every
//! diagnostic emitted since the last flush.

use std::io::Write;

use serde::Serialize;

use crate::{Diagnostic, ErrorCode, Label, Severity, Suggestion};

use super::{DiagnosticEmitter, FileContext};

/// One diagnostic as written to JSON.
#[derive(Serialize)]
struct JsonRecord<'d> {
    file: Option<String>,
    code: ErrorCode,
    severity: Severity,
    message: &'d str,
    line: Option<u32>,
    column: Option<u32>,
    labels: &'d [Label],
    notes: &'d [String],
    suggestions: &'d [Suggestion],
}

/// JSON emitter for machine-readable output.
///
/// Records are buffered and written as a single array by
/// [`DiagnosticEmitter::flush`].
pub struct JsonEmitter<W: Write> {
    writer: W,
    file: Option<FileContext>,
    records: Vec<serde_json::Value>,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            file: None,
            records: Vec::new(),
        }
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn begin_file(&mut self, path: &str, source: &str) {
        self.file = Some(FileContext::new(path, source));
    }

    fn emit(&mut self, diagnostic: &Diagnostic) {
        let position = match (&self.file, diagnostic.primary_span()) {
            (Some(file), Some(span)) => Some(file.line_col(span.start)),
            _ => None,
        };
        let record = JsonRecord {
            file: self.file.as_ref().map(|f| f.path.clone()),
            code: diagnostic.code,
            severity: diagnostic.severity,
            message: &diagnostic.message,
            line: position.map(|(line, _)| line),
            column: position.map(|(_, col)| col),
            labels: &diagnostic.labels,
            notes: &diagnostic.notes,
            suggestions: &diagnostic.suggestions,
        };
        if let Ok(value) = serde_json::to_value(&record) {
            self.records.push(value);
        }
    }

    fn flush(&mut self) {
        let records = std::mem::take(&mut self.records);
        if serde_json::to_writer_pretty(&mut self.writer, &records).is_ok() {
            let _ = writeln!(self.writer);
        }
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, _error_count: usize) {
        // The array length is the summary.
    }
}
