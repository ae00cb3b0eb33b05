//! The escape policy engine.
//!
//! One pass over a file:
//!
//! 1. segment it into runs and classify it as markup or data;
//! 2. turn each run (a block) into sentences, each with an output
//!    context: attribute values for start tags, string and template
//!    tokens for script bodies, the whole run for content;
//! 3. check every interpolated expression of every sentence, recording
//!    violations and the edit that repairs each expression;
//! 4. lift the edits from sentence to block to file and apply them.
//!
//! The pass is a pure function of the text and the configuration.

use esc_diagnostic::{to_offset, Span, TextEdit};
use esc_lexer_core::{tokenize, TokenKind};
use esc_markup::{parse_tag, segment, Run, RunKind};

use crate::patch::{apply_edits, EditList, OccurrenceLedger};
use crate::report::{Report, Violation, ViolationKind};
use crate::rules::skip_reason;
use crate::{classify_document, find_expressions, Context, DocumentKind, EscapeConfig, Expression};

/// Lower-cased fragments marking a JSONP callback name.
const CALLBACK_MARKERS: [&str; 3] = ["smarty.get.callback", "smarty.post.callback", "spcallback"];

/// Check `content` and, when `auto_fix` is set, repair it.
#[tracing::instrument(level = "debug", skip_all, fields(len = content.len(), auto_fix = auto_fix))]
pub fn parse(content: &str, config: &EscapeConfig, auto_fix: bool) -> Report {
    let runs = segment(content, &config.delimiters);
    let document = classify_document(content, &runs, config);
    tracing::debug!(kind = %document.kind, reason = %document.reason, "classified document");

    let mut scan = ScanContext::new(content, config);
    match document.kind {
        DocumentKind::Markup => scan.check_markup(&runs),
        DocumentKind::Data => scan.check_data(),
    }
    let ScanContext {
        violations, edits, ..
    } = scan;

    let (repaired, rejected_edits) = if auto_fix && !edits.is_empty() {
        let patched = apply_edits(content, edits.into_edits());
        for error in &patched.rejected {
            tracing::warn!(%error, "skipping edit");
        }
        (patched.text, patched.rejected)
    } else {
        (content.to_owned(), Vec::new())
    };
    let real_content = strip_no_escape(&repaired, config);

    Report {
        violations,
        content: repaired,
        real_content,
        document,
        rejected_edits,
    }
}

/// Violation messages for `content`, without repairing it.
pub fn check(content: &str, config: &EscapeConfig) -> Vec<String> {
    parse(content, config, false).messages()
}

/// `content` with every fixable violation repaired, unless the
/// configuration disables auto-fix.
pub fn repair(content: &str, config: &EscapeConfig) -> String {
    parse(content, config, config.auto_fix).content
}

/// Remove the opt-out marker modifier from every expression.
pub fn strip_no_escape(content: &str, config: &EscapeConfig) -> String {
    let Some(marker) = config.escape_map.no_escape() else {
        return content.to_owned();
    };
    let edits: Vec<TextEdit> = find_expressions(content, &config.delimiters)
        .iter()
        .flat_map(|expr| &expr.modifiers)
        .filter(|m| m.matches(marker))
        .map(|m| TextEdit::delete(m.span))
        .collect();
    if edits.is_empty() {
        return content.to_owned();
    }
    apply_edits(content, edits).text
}

/// A fragment of a block checked in one context.
#[derive(Copy, Clone, Debug)]
struct Sentence {
    span: Span,
    context: Context,
}

/// Per-file scan state.
struct ScanContext<'s> {
    source: &'s str,
    config: &'s EscapeConfig,
    violations: Vec<Violation>,
    /// Where each block sits in the file.
    blocks: OccurrenceLedger<'s>,
    /// File-relative edits.
    edits: EditList,
}

impl<'s> ScanContext<'s> {
    fn new(source: &'s str, config: &'s EscapeConfig) -> Self {
        ScanContext {
            source,
            config,
            violations: Vec::new(),
            blocks: OccurrenceLedger::new(),
            edits: EditList::new(),
        }
    }

    fn check_markup(&mut self, runs: &[Run]) {
        for run in runs {
            self.blocks.record(run.text(self.source), run.span.start);
        }
        for run in runs {
            let block = run.text(self.source);
            let sentences = self.sentences(run.kind, block);
            tracing::debug!(
                kind = %run.kind,
                span = ?run.span,
                sentences = sentences.len(),
                "checking run"
            );
            self.check_block(block, &sentences);
        }
    }

    /// A non-markup file is one block, scanned as script in the `data`
    /// context.
    fn check_data(&mut self) {
        let source = self.source;
        self.blocks.record(source, 0);
        let sentences = self.script_sentences(source, Context::Data);
        self.check_block(source, &sentences);
    }

    fn sentences(&self, kind: RunKind, block: &str) -> Vec<Sentence> {
        match kind {
            RunKind::TagStart | RunKind::ScriptStart | RunKind::StyleStart => {
                self.attribute_sentences(block)
            }
            RunKind::ScriptContent if block.trim().is_empty() => Vec::new(),
            RunKind::ScriptContent => self.script_sentences(block, Context::Js),
            RunKind::Xml => Vec::new(),
            _ => vec![Sentence {
                span: Span::new(0, to_offset(block.len())),
                context: Context::Html,
            }],
        }
    }

    /// One sentence per attribute: `on*` handlers are `event`, URLs are
    /// `path`, everything else is `html`. A bare attribute checks its
    /// name, which is where a template span in attribute position ends up.
    fn attribute_sentences(&self, tag: &str) -> Vec<Sentence> {
        let info = parse_tag(tag, &self.config.delimiters);
        let is_form = info.name.eq_ignore_ascii_case("form");
        info.attributes
            .iter()
            .filter_map(|attr| {
                let name = attr.name_text(tag);
                let is_event = name.get(..2).is_some_and(|p| p.eq_ignore_ascii_case("on"));
                let context = if is_event && attr.value.is_some() {
                    Context::Event
                } else if name.eq_ignore_ascii_case("src")
                    || name.eq_ignore_ascii_case("href")
                    || (is_form && name.eq_ignore_ascii_case("action"))
                {
                    Context::Path
                } else {
                    Context::Html
                };
                let span = match (context, attr.value) {
                    (_, Some(value)) => value,
                    (Context::Path, None) => return None,
                    (_, None) => attr.name,
                };
                Some(Sentence { span, context })
            })
            .collect()
    }

    /// Template and string tokens of a script fragment.
    fn script_sentences(&self, script: &str, context: Context) -> Vec<Sentence> {
        tokenize(script, &self.config.delimiters)
            .into_iter()
            .filter(|t| matches!(t.kind, TokenKind::TplDelimiter | TokenKind::String))
            .map(|t| Sentence {
                span: Span::new(t.start, t.end()),
                context,
            })
            .collect()
    }

    fn check_block(&mut self, block: &'s str, sentences: &[Sentence]) {
        let Some(base) = self.blocks.locate(block) else {
            tracing::warn!(len = block.len(), "block not found in occurrence ledger");
            return;
        };

        let mut ledger = OccurrenceLedger::new();
        for sentence in sentences {
            ledger.record(sentence.span.slice(block), sentence.span.start);
        }

        let mut block_edits = EditList::new();
        for sentence in sentences {
            let text = sentence.span.slice(block);
            let Some(offset) = ledger.locate(text) else {
                continue;
            };
            let edits = self.check_sentence(text, sentence.context, base + offset);
            block_edits.absorb(edits, offset);
        }
        self.edits.absorb(block_edits, base);
    }

    /// Check every expression of one sentence. `origin` is the sentence's
    /// file offset, used for reporting; the returned edits are
    /// sentence-relative.
    fn check_sentence(&mut self, sentence: &str, context: Context, origin: u32) -> EditList {
        let mut edits = EditList::new();
        for (index, expr) in find_expressions(sentence, &self.config.delimiters)
            .iter()
            .enumerate()
        {
            let context = required_context(expr, context, index);
            if let Some(reason) = skip_reason(expr, self.config) {
                tracing::trace!(value = %expr.value, %context, %reason, "skipped");
                continue;
            }
            let findings = assess(expr, context, self.config);
            tracing::trace!(
                value = %expr.value,
                %context,
                findings = findings.len(),
                "checked"
            );
            if expr.unterminated {
                tracing::debug!(value = %expr.value, "unterminated modifier chain; not rewriting");
                for finding in findings {
                    self.violations
                        .push(finding.into_violation(expr, context, origin, None));
                }
                continue;
            }
            let Some(edit) = rewrite(expr, sentence, &findings) else {
                continue;
            };

            let mut fix = Some(edit.shifted(origin));
            for finding in findings {
                self.violations
                    .push(finding.into_violation(expr, context, origin, fix.take()));
            }
            edits.push(edit);
        }
        edits
    }
}

/// The context an expression actually needs: callback names override
/// everything, and a URL attribute whose value starts with an expression
/// is checked as `html` for that expression.
fn required_context(expr: &Expression, context: Context, index: usize) -> Context {
    let lower = expr.value.to_lowercase();
    if CALLBACK_MARKERS.iter().any(|m| lower.contains(m)) {
        Context::Callback
    } else if context == Context::Path && index == 0 && expr.span.start == 1 {
        Context::Html
    } else {
        context
    }
}

/// A policy failure of one expression.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Finding {
    /// `modifier` must be appended; `remove` lists conflicting modifiers
    /// dropped alongside.
    Missing { modifier: String, remove: Vec<String> },
    /// `removed` cannot coexist with `kept`.
    Conflict { kept: String, removed: String },
}

impl Finding {
    fn into_violation(
        self,
        expr: &Expression,
        context: Context,
        origin: u32,
        fix: Option<TextEdit>,
    ) -> Violation {
        let (kind, message, modifier) = match self {
            Finding::Missing { modifier, .. } => (
                ViolationKind::MissingEscape,
                format!("{} must be use \"{context}\" escape.", expr.value),
                modifier,
            ),
            Finding::Conflict { kept, removed } => (
                ViolationKind::ConflictingEscape,
                format!(
                    "[{}] can not be use \"{removed}\" and \"{kept}\" to escape at the same time.",
                    expr.value
                ),
                removed,
            ),
        };
        Violation {
            expression: expr.value.clone(),
            context,
            kind,
            message,
            span: expr.span.shift(origin),
            modifier,
            fix,
        }
    }
}

/// Decide what, if anything, is wrong with `expr` in `context`.
///
/// A missing modifier is appended; the conflict pairs are then checked
/// against the chain as it will read after the rewrite, so one pass
/// leaves nothing for the next.
fn assess(expr: &Expression, context: Context, config: &EscapeConfig) -> Vec<Finding> {
    let map = &config.escape_map;
    let present = |c: Context| map.get(c).filter(|m| expr.has_modifier(m));

    let Some(required) = map.get(context).filter(|m| !expr.has_modifier(m)) else {
        return conflicts(config, context, present);
    };
    if [Context::Event, Context::Data]
        .into_iter()
        .any(|c| covers(c, context) && present(c).is_some())
    {
        return conflicts(config, context, present);
    }

    let remove: Vec<&str> = config
        .conflict_map
        .conflicts_of(context)
        .iter()
        .filter_map(|&c| present(c))
        .filter(|m| *m != required)
        .collect();
    let remaining = |c: Context| {
        map.get(c)
            .filter(|m| *m == required || (expr.has_modifier(m) && !remove.contains(m)))
    };
    let mut findings = vec![Finding::Missing {
        modifier: required.to_owned(),
        remove: remove.iter().map(|m| (*m).to_owned()).collect(),
    }];
    findings.extend(conflicts(config, context, remaining));
    findings
}

/// Whether the modifier of `by` satisfies `context`: event covers every
/// context except callbacks, data covers js and html.
fn covers(by: Context, context: Context) -> bool {
    by == context
        || (by == Context::Event && context != Context::Callback)
        || (by == Context::Data && matches!(context, Context::Js | Context::Html))
}

/// Conflict pairs among the modifiers `has` reports. A modifier is
/// dropped at most once, and the one `context` requires stays unless its
/// rival covers `context` too.
fn conflicts<'c>(
    config: &'c EscapeConfig,
    context: Context,
    has: impl Fn(Context) -> Option<&'c str>,
) -> Vec<Finding> {
    let required = config.escape_map.get(context);
    let mut dropped: Vec<&str> = Vec::new();
    let mut findings = Vec::new();
    for (source, rivals) in config.conflict_map.iter() {
        for &rival in rivals {
            let Some(kept) = has(source).filter(|m| !dropped.contains(m)) else {
                break;
            };
            let Some(removed) = has(rival).filter(|m| *m != kept && !dropped.contains(m)) else {
                continue;
            };
            let (kept, removed) = if Some(removed) == required && !covers(source, context) {
                (removed, kept)
            } else {
                (kept, removed)
            };
            dropped.push(removed);
            findings.push(Finding::Conflict {
                kept: kept.to_owned(),
                removed: removed.to_owned(),
            });
        }
    }
    findings
}

/// One replacement of the expression body implementing every finding.
fn rewrite(expr: &Expression, sentence: &str, findings: &[Finding]) -> Option<TextEdit> {
    if findings.is_empty() {
        return None;
    }
    let mut removed: Vec<&str> = Vec::new();
    let mut append = None;
    for finding in findings {
        match finding {
            Finding::Missing { modifier, remove } => {
                append = Some(modifier.as_str());
                removed.extend(remove.iter().map(String::as_str));
            }
            Finding::Conflict { removed: m, .. } => removed.push(m),
        }
    }

    let body = expr.body_text(sentence);
    let mut text = String::with_capacity(body.len() + 16);
    let mut copied_to = expr.body.start;
    for modifier in &expr.modifiers {
        if removed.iter().any(|m| modifier.matches(m)) {
            text.push_str(&sentence[copied_to as usize..modifier.span.start as usize]);
            copied_to = modifier.span.end;
        }
    }
    text.push_str(&sentence[copied_to as usize..expr.body.end as usize]);
    if let Some(modifier) = append {
        text.push('|');
        text.push_str(modifier);
    }
    Some(TextEdit::replace(expr.body, text))
}
