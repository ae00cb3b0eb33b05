//! Violations and the per-file report.

use esc_diagnostic::{Diagnostic, ErrorCode, Span, TextEdit};

use crate::{Classification, Context, PatchError};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// The context's modifier is absent.
    MissingEscape,
    /// Two modifiers that must not be combined are both present.
    ConflictingEscape,
}

impl ViolationKind {
    pub fn code(self) -> ErrorCode {
        match self {
            ViolationKind::MissingEscape => ErrorCode::X0001,
            ViolationKind::ConflictingEscape => ErrorCode::X0002,
        }
    }
}

/// One policy violation, in file coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// The expression value, without `$`.
    pub expression: String,
    pub context: Context,
    pub kind: ViolationKind,
    pub message: String,
    /// The template span, delimiters included.
    pub span: Span,
    /// The missing modifier, or the conflicting one to remove.
    pub modifier: String,
    /// The edit repairing the whole expression. Only the first violation
    /// of an expression carries it.
    pub fix: Option<TextEdit>,
}

impl Violation {
    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match self.kind {
            ViolationKind::MissingEscape => format!("needs `{}`", self.modifier),
            ViolationKind::ConflictingEscape => format!("`{}` must be removed", self.modifier),
        };
        let mut diag = Diagnostic::error(self.kind.code())
            .with_message(&self.message)
            .with_label(self.span, label)
            .with_note(format!("context: {}", self.context));
        if let Some(edit) = &self.fix {
            diag = diag.with_fix(format!("rewrite as `{}`", edit.new_text), edit.clone());
        }
        diag
    }
}

/// Everything one engine pass produced for a file.
#[derive(Clone, Debug)]
pub struct Report {
    /// In file order.
    pub violations: Vec<Violation>,
    /// The repaired file, or the input unchanged when not fixing.
    pub content: String,
    /// `content` with the opt-out marker stripped from every expression.
    pub real_content: String,
    /// How the file was classified, and why.
    pub document: Classification,
    /// Edits dropped because they collided with another edit.
    pub rejected_edits: Vec<PatchError>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.message.clone()).collect()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.violations.iter().map(Violation::to_diagnostic).collect()
    }
}

#[cfg(test)]
mod tests;
