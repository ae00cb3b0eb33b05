use pretty_assertions::assert_eq;

use super::*;

fn runs(source: &str) -> Vec<(RunKind, &str)> {
    segment(source, &Delimiters::default())
        .into_iter()
        .map(|run| (run.kind, run.text(source)))
        .collect()
}

use RunKind::*;

// ─── Tags and content ───

#[test]
fn tags_and_content() {
    assert_eq!(
        runs(r#"<div class="a">Hi <&$name&></div>"#),
        vec![
            (TagStart, r#"<div class="a">"#),
            (Content, "Hi <&$name&>"),
            (TagEnd, "</div>"),
        ]
    );
}

#[test]
fn template_span_inside_attribute_value_is_opaque() {
    assert_eq!(
        runs(r#"<a href="<&$u|x>y&>">t</a>"#),
        vec![
            (TagStart, r#"<a href="<&$u|x>y&>">"#),
            (Content, "t"),
            (TagEnd, "</a>"),
        ]
    );
}

#[test]
fn template_span_in_content_does_not_start_a_tag() {
    assert_eq!(runs("a <&$x > 1&> b"), vec![(Content, "a <&$x > 1&> b")]);
}

#[test]
fn template_span_as_attribute() {
    assert_eq!(
        runs("<div <&$attrs&>>x"),
        vec![(TagStart, "<div <&$attrs&>>"), (Content, "x")]
    );
}

#[test]
fn lone_less_than_is_content() {
    assert_eq!(runs("a < b </ c"), vec![(Content, "a < b </ c")]);
}

#[test]
fn stray_apostrophe_in_tag_body_does_not_swallow_file() {
    assert_eq!(
        runs("<p it's>x</p>"),
        vec![(TagStart, "<p it's>"), (Content, "x"), (TagEnd, "</p>")]
    );
}

#[test]
fn unterminated_tag_runs_to_eof() {
    assert_eq!(runs(r#"<div class="a"#), vec![(TagStart, r#"<div class="a"#)]);
}

#[test]
fn custom_delimiters() {
    let source = "<p title=\"{{ $a > b }}\">";
    let runs = segment(source, &Delimiters::new("{{", "}}"));
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].kind, TagStart);
    assert_eq!(runs[0].span, Span::new(0, 24));
}

// ─── Raw text elements ───

#[test]
fn script_is_split_into_start_content_end() {
    assert_eq!(
        runs(r#"<script type="text/javascript">var a = "<&$x&>";</script>"#),
        vec![
            (ScriptStart, r#"<script type="text/javascript">"#),
            (ScriptContent, r#"var a = "<&$x&>";"#),
            (ScriptEnd, "</script>"),
        ]
    );
}

#[test]
fn script_body_ignores_other_tags() {
    assert_eq!(
        runs(r#"<script>s = "<div></div>";</script>"#),
        vec![
            (ScriptStart, "<script>"),
            (ScriptContent, r#"s = "<div></div>";"#),
            (ScriptEnd, "</script>"),
        ]
    );
}

#[test]
fn script_close_tag_is_case_insensitive() {
    assert_eq!(
        runs("<SCRIPT>x</SCRIPT >"),
        vec![
            (ScriptStart, "<SCRIPT>"),
            (ScriptContent, "x"),
            (ScriptEnd, "</SCRIPT >"),
        ]
    );
}

#[test]
fn close_tag_inside_template_span_does_not_end_script() {
    assert_eq!(
        runs("<script>a=\"<&$x|f:'</script>'&>\";</script>"),
        vec![
            (ScriptStart, "<script>"),
            (ScriptContent, "a=\"<&$x|f:'</script>'&>\";"),
            (ScriptEnd, "</script>"),
        ]
    );
}

#[test]
fn empty_script_has_no_content_run() {
    assert_eq!(
        runs(r#"<script src="a.js"></script>"#),
        vec![(ScriptStart, r#"<script src="a.js">"#), (ScriptEnd, "</script>")]
    );
}

#[test]
fn self_closing_script_is_plain_tag() {
    assert_eq!(
        runs(r#"<script src="a" /><p>"#),
        vec![(TagStart, r#"<script src="a" />"#), (TagStart, "<p>")]
    );
}

#[test]
fn unterminated_script_body_runs_to_eof() {
    assert_eq!(
        runs("<script>var a"),
        vec![(ScriptStart, "<script>"), (ScriptContent, "var a")]
    );
}

#[test]
fn style_is_split_into_start_content_end() {
    assert_eq!(
        runs("<style>.a{color:<&$c&>}</style>"),
        vec![
            (StyleStart, "<style>"),
            (StyleContent, ".a{color:<&$c&>}"),
            (StyleEnd, "</style>"),
        ]
    );
}

// ─── Comments, doctype, XML ───

#[test]
fn comment_doctype_and_xml() {
    assert_eq!(
        runs(r#"<?xml version="1.0"?><!DOCTYPE html><!-- <&$x&> --><![CDATA[<b>]]>"#),
        vec![
            (Xml, r#"<?xml version="1.0"?>"#),
            (Doctype, "<!DOCTYPE html>"),
            (Comment, "<!-- <&$x&> -->"),
            (Xml, "<![CDATA[<b>]]>"),
        ]
    );
}

#[test]
fn unterminated_comment_runs_to_eof() {
    assert_eq!(runs("a<!-- b"), vec![(Content, "a"), (Comment, "<!-- b")]);
}

#[test]
fn bang_without_keyword_is_content() {
    assert_eq!(runs("<!x>"), vec![(Content, "<!x>")]);
}

#[test]
fn empty_input_has_no_runs() {
    assert!(segment("", &Delimiters::default()).is_empty());
}

// ─── Coverage ───

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_coverage {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn assert_covers(source: &str) {
        let runs = segment(source, &Delimiters::default());
        let mut pos = 0;
        for run in &runs {
            assert!(!run.span.is_empty(), "empty run in {source:?}");
            assert_eq!(run.span.start, pos, "gap or overlap in {source:?}");
            pos = run.span.end;
        }
        assert_eq!(pos as usize, source.len(), "runs stop early in {source:?}");
    }

    fn fragment() -> impl Strategy<Value = &'static str> {
        proptest::sample::select(vec![
            "<", ">", "</", "<p ", "<script>", "</script>", "<style>", "</STYLE>", "<!--",
            "-->", "<!doctype", "<?", "?>", "<![CDATA[", "]]>", "<&", "&>", "$a", "\"",
            "'", "=", "a", " ", "\n", "é", "/",
        ])
    }

    proptest! {
        #[test]
        fn runs_cover_arbitrary_text(source in any::<std::string::String>()) {
            assert_covers(&source);
        }

        #[test]
        fn runs_cover_markup_like_text(parts in proptest::collection::vec(fragment(), 0..40)) {
            assert_covers(&parts.concat());
        }
    }
}
