//! Diagnostics for the template escape checker.
//!
//! - [`Span`]: byte range into a template file
//! - [`Diagnostic`]: code, severity, message, labels, notes and fixes
//! - [`TextEdit`]: the unit of rewriting shared with the patcher
//! - [`emitter`]: terminal and JSON output
//!
//! Error codes are searchable (`X0001` missing escape, `X0002`
//! conflicting escapes) and every diagnostic produced by the policy engine
//! carries the edit that repairs it.

mod diagnostic;
pub mod emitter;
mod error_code;
mod fixes;
mod span;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use fixes::{Suggestion, TextEdit};
pub use span::{to_offset, Span};
