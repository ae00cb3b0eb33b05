use pretty_assertions::assert_eq;

use super::*;

fn attrs(tag: &str) -> Vec<(&str, Option<&str>)> {
    parse_tag(tag, &Delimiters::default())
        .attributes
        .iter()
        .map(|a| (a.name_text(tag), a.value_text(tag)))
        .collect()
}

#[test]
fn quoted_single_quoted_and_bare_attributes() {
    let tag = r#"<a href="x" title='t' disabled>"#;
    let info = parse_tag(tag, &Delimiters::default());
    assert_eq!(info.name, "a");
    assert_eq!(
        info.attributes[0],
        Attribute {
            name: Span::new(3, 7),
            value: Some(Span::new(8, 11)),
        }
    );
    assert_eq!(
        attrs(tag),
        vec![
            ("href", Some(r#""x""#)),
            ("title", Some("'t'")),
            ("disabled", None),
        ]
    );
}

#[test]
fn template_span_in_place_of_attribute() {
    assert_eq!(
        attrs("<div <&$attrs&> id=<&$id&>>"),
        vec![("<&$attrs&>", None), ("id", Some("<&$id&>"))]
    );
}

#[test]
fn template_span_inside_attribute_name() {
    assert_eq!(
        attrs(r#"<input data-<&$k&>="v">"#),
        vec![("data-<&$k&>", Some(r#""v""#))]
    );
}

#[test]
fn quote_inside_template_span_does_not_close_value() {
    assert_eq!(
        attrs(r#"<a title="<&$t|default:"x"&>" id=1>"#),
        vec![
            ("title", Some(r#""<&$t|default:"x"&>""#)),
            ("id", Some("1")),
        ]
    );
}

#[test]
fn spaces_around_equals() {
    assert_eq!(attrs(r#"<a href = "x">"#), vec![("href", Some(r#""x""#))]);
}

#[test]
fn self_closing_tags() {
    let info = parse_tag("<br/>", &Delimiters::default());
    assert_eq!(info.name, "br");
    assert!(info.attributes.is_empty());
    assert_eq!(attrs("<img src=a.png />"), vec![("src", Some("a.png"))]);
}

#[test]
fn end_tag_name() {
    assert_eq!(parse_tag("</Form>", &Delimiters::default()).name, "Form");
}

#[test]
fn event_attribute_with_template_value() {
    assert_eq!(
        attrs(r#"<button onclick="go('<&$id&>')">"#),
        vec![("onclick", Some(r#""go('<&$id&>')""#))]
    );
}

#[test]
fn unterminated_value_runs_to_end() {
    assert_eq!(attrs(r#"<a href="x"#), vec![("href", Some(r#""x"#))]);
}

#[test]
fn stray_equals_is_skipped() {
    assert_eq!(attrs("<a =x>"), vec![("x", None)]);
}
