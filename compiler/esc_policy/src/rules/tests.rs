use pretty_assertions::assert_eq;

use super::*;
use crate::find_expressions;

fn reason(expr_text: &str, config: &EscapeConfig) -> Option<SkipReason> {
    let found = find_expressions(expr_text, &config.delimiters);
    let Some(expr) = found.first() else {
        panic!("no expression in {expr_text:?}");
    };
    skip_reason(expr, config)
}

fn config() -> EscapeConfig {
    EscapeConfig::default()
        .with_modifier(Context::Html, "e_html")
        .with_modifier(Context::Path, "e_path")
        .with_no_escape("raw")
}

#[test]
fn reserved_variables() {
    let config = config();
    for text in [
        "<&$smarty.foreach.i.index&>",
        "<&$smarty.capture.x&>",
        "<&$smarty.now&>",
        "<&$smarty.section.s&>",
        "<&$smarty.block.b&>",
        "<&$smarty.const.C&>",
    ] {
        assert_eq!(reason(text, &config), Some(SkipReason::Reserved), "{text}");
    }
    assert_eq!(reason("<&$smarty.get.x&>", &config), None);
}

#[test]
fn path_and_no_escape_modifiers() {
    let config = config();
    assert_eq!(reason("<&$u|e_path&>", &config), Some(SkipReason::PathModifier));
    assert_eq!(reason("<&$u|raw&>", &config), Some(SkipReason::NoEscape));
    assert_eq!(reason("<&$raw_html&>", &config), None);
}

#[test]
fn unconfigured_path_is_not_a_skip() {
    let config = EscapeConfig::default();
    assert_eq!(reason("<&$u|e_path&>", &config), None);
}

#[test]
fn date_format() {
    assert_eq!(
        reason(r#"<&$t|date_format:"%Y"&>"#, &config()),
        Some(SkipReason::DateFormat)
    );
}

#[test]
fn explicit_escape_modes_with_any_quoting() {
    let config = config();
    for text in [
        "<&$u|escape:url&>",
        r#"<&$u|escape:"url"&>"#,
        "<&$u|escape:'none'&>",
        "<&$u|ESCAPE:URL&>",
    ] {
        assert_eq!(reason(text, &config), Some(SkipReason::ExplicitEscape), "{text}");
    }
    assert_eq!(reason(r#"<&$u|escape:"url&>"#, &config), None);
    assert_eq!(reason("<&$u|escape:html&>", &config), None);
}

#[test]
fn numeric_string_format() {
    let config = config();
    assert_eq!(
        reason(r#"<&$n|string_format:"%.2f"&>"#, &config),
        Some(SkipReason::NumericFormat)
    );
    assert_eq!(
        reason("<&$n|string_format:'total %d items'&>", &config),
        Some(SkipReason::NumericFormat)
    );
    assert_eq!(reason(r#"<&$n|string_format:"%s"&>"#, &config), None);
}

#[test]
fn computed_values() {
    assert!(is_computed("a+1"));
    assert!(is_computed("i = 0"));
    assert!(is_computed("a|default:'x'-1"));
    assert!(!is_computed("a|default:'-'"));
    assert!(!is_computed(r#"a|replace:"/":"""#));
    assert!(!is_computed("user.name"));
    assert_eq!(reason("<&$a*2&>", &config()), Some(SkipReason::Computed));
}

#[test]
fn safe_variables_in_order() {
    let Ok(config) = config()
        .with_safe_var("^config\\.")
        .and_then(|c| c.with_safe_var("_id$"))
    else {
        panic!("patterns are valid");
    };
    assert_eq!(reason("<&$config.title&>", &config), Some(SkipReason::SafeVar(0)));
    assert_eq!(reason("<&$user_id&>", &config), Some(SkipReason::SafeVar(1)));
    assert_eq!(reason("<&$user.name&>", &config), None);
}

#[test]
fn reasons_display() {
    assert_eq!(SkipReason::SafeVar(2).to_string(), "safe variable pattern #2");
    assert_eq!(SkipReason::Computed.to_string(), "computed value");
}
