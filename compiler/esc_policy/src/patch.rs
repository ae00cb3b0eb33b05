//! Occurrence-indexed patching.
//!
//! Edits are made against an immutable snapshot of the file. Each edit is
//! first expressed relative to the fragment being analyzed (an attribute
//! value, a script string, a content block), then lifted into the
//! coordinates of the enclosing fragment and finally of the file.
//!
//! Lifting needs the fragment's offset in its parent. The text alone is
//! not enough when the same fragment occurs twice, so every scope keeps an
//! [`OccurrenceLedger`]: fragments are recorded in scan order before the
//! pass, and each lookup consumes the earliest unclaimed occurrence of that
//! exact text. The occurrence under analysis is therefore the only one a
//! patch can land on.

use std::collections::VecDeque;

use esc_diagnostic::{Span, TextEdit};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Offsets of recorded fragments, queued per distinct text.
#[derive(Debug, Default)]
pub struct OccurrenceLedger<'s> {
    queues: FxHashMap<&'s str, VecDeque<u32>>,
}

impl<'s> OccurrenceLedger<'s> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `text` occurs at `offset`. Calls must come in scan
    /// order.
    pub fn record(&mut self, text: &'s str, offset: u32) {
        self.queues.entry(text).or_default().push_back(offset);
    }

    /// Claim the earliest unclaimed occurrence of `text`.
    pub fn locate(&mut self, text: &str) -> Option<u32> {
        self.queues.get_mut(text).and_then(VecDeque::pop_front)
    }
}

/// Edits relative to one fragment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditList {
    edits: Vec<TextEdit>,
}

impl EditList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, edit: TextEdit) {
        self.edits.push(edit);
    }

    /// Move `child`'s edits into this list, lifted by `offset` (the
    /// child fragment's position in this one).
    pub fn absorb(&mut self, child: EditList, offset: u32) {
        self.edits
            .extend(child.edits.into_iter().map(|e| e.shifted(offset)));
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn into_edits(self) -> Vec<TextEdit> {
        self.edits
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PatchError {
    #[error("edit at {span:?} overlaps an earlier edit at {previous:?}")]
    Overlap { span: Span, previous: Span },
    #[error("edit at {span:?} is outside the {len}-byte snapshot")]
    OutOfBounds { span: Span, len: usize },
}

/// The result of applying edits: the new text plus every edit that was
/// rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Patched {
    pub text: String,
    pub rejected: Vec<PatchError>,
}

/// Apply `edits` to `snapshot` in one pass.
///
/// Edits are sorted by position (stable, so insertions at the same point
/// keep their order). An edit that overlaps an accepted one, or does not
/// address whole characters of the snapshot, is rejected and skipped.
pub fn apply_edits(snapshot: &str, mut edits: Vec<TextEdit>) -> Patched {
    edits.sort_by_key(|e| (e.span.start, e.span.end));

    let mut text = String::with_capacity(snapshot.len());
    let mut rejected = Vec::new();
    let mut copied_to = 0usize;
    let mut previous: Option<Span> = None;

    for edit in edits {
        let range = edit.span.to_range();
        if snapshot.get(range.clone()).is_none() {
            rejected.push(PatchError::OutOfBounds {
                span: edit.span,
                len: snapshot.len(),
            });
            continue;
        }
        if let Some(prev) = previous.filter(|_| range.start < copied_to) {
            rejected.push(PatchError::Overlap {
                span: edit.span,
                previous: prev,
            });
            continue;
        }
        text.push_str(&snapshot[copied_to..range.start]);
        text.push_str(&edit.new_text);
        copied_to = range.end;
        previous = Some(edit.span);
    }
    text.push_str(&snapshot[copied_to..]);

    Patched { text, rejected }
}

#[cfg(test)]
mod tests;
