use pretty_assertions::assert_eq;

use super::*;
use crate::{ClassifyReason, DocumentKind};

fn missing() -> Violation {
    Violation {
        expression: "name".to_owned(),
        context: Context::Html,
        kind: ViolationKind::MissingEscape,
        message: r#"name must be use "html" escape."#.to_owned(),
        span: Span::new(5, 14),
        modifier: "e_html".to_owned(),
        fix: Some(TextEdit::replace(Span::new(7, 12), "$name|e_html")),
    }
}

#[test]
fn kinds_map_to_codes() {
    assert_eq!(ViolationKind::MissingEscape.code(), ErrorCode::X0001);
    assert_eq!(ViolationKind::ConflictingEscape.code(), ErrorCode::X0002);
}

#[test]
fn missing_escape_diagnostic() {
    let diag = missing().to_diagnostic();
    assert_eq!(diag.code, ErrorCode::X0001);
    assert_eq!(diag.message, r#"name must be use "html" escape."#);
    assert_eq!(diag.primary_span(), Some(Span::new(5, 14)));
    assert_eq!(diag.labels[0].message, "needs `e_html`");
    assert_eq!(diag.notes, vec!["context: html".to_owned()]);
    assert_eq!(diag.suggestions[0].message, "rewrite as `$name|e_html`");
    assert_eq!(
        diag.suggestions[0].edits,
        vec![TextEdit::replace(Span::new(7, 12), "$name|e_html")]
    );
}

#[test]
fn conflict_without_fix_has_no_suggestion() {
    let violation = Violation {
        kind: ViolationKind::ConflictingEscape,
        modifier: "e_js".to_owned(),
        fix: None,
        ..missing()
    };
    let diag = violation.to_diagnostic();
    assert_eq!(diag.code, ErrorCode::X0002);
    assert_eq!(diag.labels[0].message, "`e_js` must be removed");
    assert!(diag.suggestions.is_empty());
}

#[test]
fn report_messages_and_diagnostics_follow_violation_order() {
    let second = Violation {
        message: "second".to_owned(),
        ..missing()
    };
    let report = Report {
        violations: vec![missing(), second],
        content: String::new(),
        real_content: String::new(),
        document: Classification {
            kind: DocumentKind::Markup,
            reason: ClassifyReason::ManyTags,
        },
        rejected_edits: Vec::new(),
    };
    assert!(!report.is_clean());
    assert_eq!(
        report.messages(),
        vec![r#"name must be use "html" escape."#.to_owned(), "second".to_owned()]
    );
    assert_eq!(report.diagnostics().len(), 2);
}
