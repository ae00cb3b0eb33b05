use pretty_assertions::assert_eq;

use super::*;

#[test]
fn names_are_distinct() {
    let kinds = [
        RunKind::Content,
        RunKind::TagStart,
        RunKind::TagEnd,
        RunKind::ScriptStart,
        RunKind::ScriptContent,
        RunKind::ScriptEnd,
        RunKind::StyleStart,
        RunKind::StyleContent,
        RunKind::StyleEnd,
        RunKind::Comment,
        RunKind::Doctype,
        RunKind::Xml,
    ];
    let mut names: Vec<_> = kinds.iter().map(|k| k.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), kinds.len());
}

#[test]
fn start_tags_have_attributes() {
    assert!(RunKind::TagStart.has_attributes());
    assert!(RunKind::ScriptStart.has_attributes());
    assert!(RunKind::StyleStart.has_attributes());
    assert!(!RunKind::TagEnd.has_attributes());
    assert!(!RunKind::ScriptContent.has_attributes());
}

#[test]
fn run_text_slices_source() {
    let run = Run::new(RunKind::TagStart, Span::new(2, 5));
    assert_eq!(run.text("ab<p>cd"), "<p>");
    assert_eq!(run.kind.to_string(), "tag-start");
}
