use pretty_assertions::assert_eq;

use super::*;

fn missing_escape() -> Diagnostic {
    Diagnostic::error(ErrorCode::X0001)
        .with_message("name must be use \"html\" escape.")
        .with_label(Span::new(5, 13), "needs `e_html`")
        .with_note("context: html")
        .with_fix(
            "append `|e_html`",
            TextEdit::replace(Span::point(11), "|e_html"),
        )
}

#[test]
fn builder_collects_parts() {
    let diag = missing_escape();
    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(diag.labels.len(), 1);
    assert_eq!(diag.primary_span(), Some(Span::new(5, 13)));
    assert_eq!(
        diag.suggestions[0].edits,
        vec![TextEdit::replace(Span::point(11), "|e_html")]
    );
}

#[test]
fn display_format() {
    assert_eq!(
        missing_escape().to_string(),
        "error [X0001]: name must be use \"html\" escape.\n  \
         --> 5..13: needs `e_html`\n  \
         = note: context: html\n  \
         = help: append `|e_html`"
    );
}

#[test]
fn unlabeled_diagnostic_has_no_primary_span() {
    let diag = Diagnostic::error(ErrorCode::X0002);
    assert_eq!(diag.primary_span(), None);
}
