//! Escape policy for `<& $var &>` templates.
//!
//! Every interpolated expression must carry the escape modifier of the
//! output context it lands in: `html` for content and attributes, `js`
//! for script, `event` for `on*` handlers, `path` for URLs, `data` for
//! JSON-like files and `callback` for JSONP callback names. The engine
//! reports violations and builds one edit per offending expression;
//! [`parse`] applies them against the original snapshot so that a patch
//! lands only on the occurrence that was analyzed.
//!
//! ```text
//! <div><& $name &></div>       =>  <div><& $name|e_html &></div>
//! <a onclick="go(<&$id&>)">     =>  <a onclick="go(<&$id|e_event&>)">
//! ```

mod classify;
mod config;
mod context;
mod engine;
mod expression;
mod patch;
mod report;
mod rules;

pub use classify::{classify_document, Classification, ClassifyReason, DocumentKind};
pub use config::{ConfigError, ConflictMap, EscapeConfig, EscapeMap};
pub use context::Context;
pub use engine::{check, parse, repair, strip_no_escape};
pub use expression::{find_expressions, Expression, Modifier};
pub use patch::{apply_edits, EditList, OccurrenceLedger, PatchError, Patched};
pub use report::{Report, Violation, ViolationKind};
pub use rules::{is_computed, skip_reason, SkipReason};
