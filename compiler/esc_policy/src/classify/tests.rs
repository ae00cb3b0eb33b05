use pretty_assertions::assert_eq;

use super::*;

fn classify(content: &str) -> Classification {
    let config = EscapeConfig::default();
    let runs = esc_markup::segment(content, &config.delimiters);
    classify_document(content, &runs, &config)
}

#[test]
fn empty_file_is_data() {
    assert_eq!(classify(""), Classification::data(ClassifyReason::NoTags));
}

#[test]
fn single_tag_outside_strings_is_markup() {
    assert_eq!(
        classify("<div><&$name&></div>"),
        Classification::markup(ClassifyReason::TagsOutsideStrings(1))
    );
}

#[test]
fn five_tags_are_markup() {
    assert_eq!(
        classify("<ul><li>a</li><li>b</li><li>c</li><li>d</li></ul>"),
        Classification::markup(ClassifyReason::ManyTags)
    );
}

#[test]
fn script_tag_is_markup() {
    assert_eq!(
        classify("<script>var a = 1;</script>"),
        Classification::markup(ClassifyReason::StructuralRun(RunKind::ScriptStart))
    );
}

#[test]
fn xml_is_markup() {
    assert_eq!(
        classify(r#"<?xml version="1.0"?><r/>"#),
        Classification::markup(ClassifyReason::StructuralRun(RunKind::Xml))
    );
}

#[test]
fn tags_right_after_quotes_are_not_counted() {
    assert_eq!(
        classify(r#"{"html": "<b>x</b>", "name": "<&$name&>"}"#),
        Classification::data(ClassifyReason::NoTags)
    );
}

#[test]
fn tags_inside_string_literals_are_data() {
    assert_eq!(
        classify(r#"{"a": "x <b>y</b>"}"#),
        Classification::data(ClassifyReason::AllTagsInStrings(1))
    );
}

#[test]
fn duplicate_tag_needs_distinct_positions() {
    assert_eq!(
        classify(r#"{"a": "x <b>", "c": 1} <b>"#),
        Classification::markup(ClassifyReason::TagsOutsideStrings(1))
    );
}

#[test]
fn override_wins() {
    let config = EscapeConfig::default().with_document_override(DocumentKind::Data);
    let content = "<script></script>";
    let runs = esc_markup::segment(content, &config.delimiters);
    assert_eq!(
        classify_document(content, &runs, &config),
        Classification::data(ClassifyReason::Override)
    );
}

#[test]
fn unmatched_tags_consumes_positions() {
    assert_eq!(unmatched_tags("<b><b>", vec!["<b>", "<b>", "<b>"]), vec!["<b>"]);
    assert_eq!(unmatched_tags("none", vec!["<i>"]), vec!["<i>"]);
}

#[test]
fn reasons_display() {
    assert_eq!(
        ClassifyReason::StructuralRun(RunKind::ScriptEnd).to_string(),
        "found a script-end run"
    );
    assert_eq!(
        ClassifyReason::AllTagsInStrings(2).to_string(),
        "all 2 start tag(s) are inside string literals"
    );
    assert_eq!(DocumentKind::Data.to_string(), "data");
}
