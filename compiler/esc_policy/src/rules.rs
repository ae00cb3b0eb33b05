//! Expressions that need no escape modifier at all.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Context, EscapeConfig, Expression};

/// Why an expression was exempt from checking.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// `$smarty.foreach`, `$smarty.now` and the other built-in variables.
    Reserved,
    /// Carries the configured `path` modifier.
    PathModifier,
    /// Carries the configured opt-out marker.
    NoEscape,
    DateFormat,
    /// `escape:url` or `escape:none`.
    ExplicitEscape,
    /// `string_format` with a numeric conversion.
    NumericFormat,
    /// Arithmetic or assignment outside string literals.
    Computed,
    /// Matches the safe-variable pattern at this index.
    SafeVar(usize),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Reserved => f.write_str("reserved variable"),
            SkipReason::PathModifier => f.write_str("path modifier"),
            SkipReason::NoEscape => f.write_str("no-escape marker"),
            SkipReason::DateFormat => f.write_str("date_format"),
            SkipReason::ExplicitEscape => f.write_str("explicit escape mode"),
            SkipReason::NumericFormat => f.write_str("numeric string_format"),
            SkipReason::Computed => f.write_str("computed value"),
            SkipReason::SafeVar(n) => write!(f, "safe variable pattern #{n}"),
        }
    }
}

const RESERVED: [&str; 6] = [
    "smarty.foreach",
    "smarty.capture",
    "smarty.now",
    "smarty.section",
    "smarty.block",
    "smarty.const",
];

/// `+` is tested first: only the first occurrence of each operator counts.
const OPERATORS: [char; 5] = ['+', '-', '*', '/', '='];

#[allow(clippy::expect_used, reason = "literal pattern")]
static EXPLICIT_ESCAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)escape:(?:"(?:url|none)"|'(?:url|none)'|(?:url|none))"#)
        .expect("valid regex")
});

#[allow(clippy::expect_used, reason = "literal pattern")]
static NUMERIC_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)string_format:(?:"[\w .]*%[\d.]*[bcdeufgox][\w .]*"|'[\w .]*%[\d.]*[bcdeufgox][\w .]*'|[\w .]*%[\d.]*[bcdeufgox])"#,
    )
    .expect("valid regex")
});

/// The first rule exempting `expr`, if any.
pub fn skip_reason(expr: &Expression, config: &EscapeConfig) -> Option<SkipReason> {
    let value = expr.value.as_str();
    if RESERVED.iter().any(|r| value.contains(r)) {
        return Some(SkipReason::Reserved);
    }
    if config
        .escape_map
        .get(Context::Path)
        .is_some_and(|m| expr.has_modifier(m))
    {
        return Some(SkipReason::PathModifier);
    }
    if config
        .escape_map
        .no_escape()
        .is_some_and(|m| expr.has_modifier(m))
    {
        return Some(SkipReason::NoEscape);
    }
    if value.contains("|date_format") {
        return Some(SkipReason::DateFormat);
    }
    if EXPLICIT_ESCAPE.is_match(value) {
        return Some(SkipReason::ExplicitEscape);
    }
    if NUMERIC_FORMAT.is_match(value) {
        return Some(SkipReason::NumericFormat);
    }
    if is_computed(value) {
        return Some(SkipReason::Computed);
    }
    config.safe_var_match(value).map(SkipReason::SafeVar)
}

/// `true` if some operator's first occurrence has an even number of each
/// quote character up to and including it.
pub fn is_computed(value: &str) -> bool {
    OPERATORS.iter().any(|&op| {
        value.find(op).is_some_and(|pos| {
            let left = &value[..=pos];
            left.matches('\'').count() % 2 == 0 && left.matches('"').count() % 2 == 0
        })
    })
}

#[cfg(test)]
mod tests;
