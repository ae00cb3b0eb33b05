use pretty_assertions::assert_eq;

use super::*;

fn eat(source: &str, delims: &Delimiters) -> (Option<SpanEnd>, u32) {
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();
    let end = eat_template_span(&mut cursor, delims);
    (end, cursor.pos())
}

// === eat_template_span ===

#[test]
fn simple_span() {
    let (end, pos) = eat("<&$name&> tail", &Delimiters::default());
    assert_eq!(end, Some(SpanEnd::Closed));
    assert_eq!(pos, 9);
}

#[test]
fn no_match_leaves_cursor() {
    let (end, pos) = eat("<div>", &Delimiters::default());
    assert_eq!(end, None);
    assert_eq!(pos, 0);
}

#[test]
fn nested_spans_close_at_depth_zero() {
    let source = "<& $a <& $b &> &>";
    let (end, pos) = eat(source, &Delimiters::default());
    assert_eq!(end, Some(SpanEnd::Closed));
    assert_eq!(pos as usize, source.len());
}

#[test]
fn escaped_right_delimiter_does_not_close() {
    let source = r"<& $a|replace:'\&>':'' &>!";
    let (end, pos) = eat(source, &Delimiters::default());
    assert_eq!(end, Some(SpanEnd::Closed));
    assert_eq!(pos as usize, source.len() - 1);
}

#[test]
fn escaped_backslash_does_not_escape_delimiter() {
    let source = r"<& '\\'&>rest";
    let (end, pos) = eat(source, &Delimiters::default());
    assert_eq!(end, Some(SpanEnd::Closed));
    assert_eq!(pos, 9);
}

#[test]
fn unterminated_span_runs_to_eof() {
    let source = "<& $a <& $b &>";
    let (end, pos) = eat(source, &Delimiters::default());
    assert_eq!(end, Some(SpanEnd::Unterminated));
    assert_eq!(pos as usize, source.len());
}

#[test]
fn custom_delimiters() {
    let delims = Delimiters::new("{%", "%}");
    let (end, pos) = eat("{% $x|e_html %} after", &delims);
    assert_eq!(end, Some(SpanEnd::Closed));
    assert_eq!(pos, 15);
}

#[test]
fn empty_delimiters_disable_matching() {
    let delims = Delimiters::new("", "&>");
    assert_eq!(eat("<&$a&>", &delims), (None, 0));
}

#[test]
fn multibyte_payload() {
    let source = "<&$名前&>";
    let (end, pos) = eat(source, &Delimiters::default());
    assert_eq!(end, Some(SpanEnd::Closed));
    assert_eq!(pos as usize, source.len());
}

// === find_template_spans ===

#[test]
fn finds_all_outer_spans() {
    let text = r#"<a href="<&$url&>" title="<&$t|e_html&>">"#;
    let delims = Delimiters::default();
    let spans = find_template_spans(text, &delims);
    let texts: Vec<&str> = spans.iter().map(|s| s.text(text)).collect();
    assert_eq!(texts, vec!["<&$url&>", "<&$t|e_html&>"]);
    assert!(spans.iter().all(|s| s.closed));
    assert_eq!(spans[1].payload(text, &delims), "$t|e_html");
}

#[test]
fn unclosed_span_payload_runs_to_end() {
    let text = "x <&$broken";
    let delims = Delimiters::default();
    let spans = find_template_spans(text, &delims);
    assert_eq!(spans.len(), 1);
    assert!(!spans[0].closed);
    assert_eq!(spans[0].payload(text, &delims), "$broken");
}

#[test]
fn no_spans_in_plain_text() {
    assert!(find_template_spans("a < b && c > d", &Delimiters::default()).is_empty());
}
