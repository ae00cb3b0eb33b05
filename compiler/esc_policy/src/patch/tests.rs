use pretty_assertions::assert_eq;

use super::*;

// ─── OccurrenceLedger ───

#[test]
fn ledger_hands_out_duplicates_in_scan_order() {
    let mut ledger = OccurrenceLedger::new();
    ledger.record("<&$a&>", 3);
    ledger.record("<&$b&>", 10);
    ledger.record("<&$a&>", 20);
    assert_eq!(ledger.locate("<&$a&>"), Some(3));
    assert_eq!(ledger.locate("<&$a&>"), Some(20));
    assert_eq!(ledger.locate("<&$a&>"), None);
    assert_eq!(ledger.locate("<&$b&>"), Some(10));
    assert_eq!(ledger.locate("<&$c&>"), None);
}

// ─── EditList ───

#[test]
fn absorb_lifts_child_edits() {
    let mut sentence = EditList::new();
    sentence.push(TextEdit::replace(Span::point(4), "|e_html"));
    let mut block = EditList::new();
    block.absorb(sentence, 10);
    let mut file = EditList::new();
    file.absorb(block, 100);
    assert_eq!(
        file.into_edits(),
        vec![TextEdit::replace(Span::point(114), "|e_html")]
    );
}

// ─── apply_edits ───

#[test]
fn applies_sorted_edits() {
    let patched = apply_edits(
        "<&$a&> <&$b|x&>",
        vec![
            TextEdit::delete(Span::new(11, 13)),
            TextEdit::replace(Span::point(4), "|e"),
        ],
    );
    assert_eq!(patched.text, "<&$a|e&> <&$b&>");
    assert!(patched.rejected.is_empty());
}

#[test]
fn no_edits_returns_snapshot() {
    let patched = apply_edits("same", Vec::new());
    assert_eq!(patched.text, "same");
}

#[test]
fn insert_then_replace_at_same_point() {
    let patched = apply_edits(
        "abcdef",
        vec![
            TextEdit::replace(Span::new(2, 4), "X"),
            TextEdit::replace(Span::point(2), "+"),
        ],
    );
    assert_eq!(patched.text, "ab+Xef");
    assert!(patched.rejected.is_empty());
}

#[test]
fn overlapping_edit_is_rejected() {
    let patched = apply_edits(
        "abcdef",
        vec![
            TextEdit::replace(Span::new(1, 4), "X"),
            TextEdit::replace(Span::new(3, 5), "Y"),
        ],
    );
    assert_eq!(patched.text, "aXef");
    assert_eq!(
        patched.rejected,
        vec![PatchError::Overlap {
            span: Span::new(3, 5),
            previous: Span::new(1, 4),
        }]
    );
}

#[test]
fn out_of_bounds_edit_is_rejected() {
    let patched = apply_edits("abc", vec![TextEdit::replace(Span::point(9), "x")]);
    assert_eq!(patched.text, "abc");
    assert_eq!(
        patched.rejected,
        vec![PatchError::OutOfBounds {
            span: Span::point(9),
            len: 3,
        }]
    );
    assert_eq!(
        patched.rejected[0].to_string(),
        "edit at 9..9 is outside the 3-byte snapshot"
    );
}

#[test]
fn edit_splitting_a_character_is_rejected() {
    let patched = apply_edits("é", vec![TextEdit::replace(Span::point(1), "x")]);
    assert_eq!(patched.text, "é");
    assert_eq!(patched.rejected.len(), 1);
}

#[test]
fn duplicate_fragments_only_patch_the_claimed_occurrence() {
    let file = "<p><&$a&></p><p><&$a&></p>";
    let mut ledger = OccurrenceLedger::new();
    ledger.record("<&$a&>", 3);
    ledger.record("<&$a&>", 16);
    let first = ledger.locate("<&$a&>");
    let second = ledger.locate("<&$a&>");
    assert_eq!((first, second), (Some(3), Some(16)));

    let mut sentence = EditList::new();
    sentence.push(TextEdit::replace(Span::point(4), "|e"));
    let mut edits = EditList::new();
    edits.absorb(sentence, second.unwrap_or_default());
    let patched = apply_edits(file, edits.into_edits());
    assert_eq!(patched.text, "<p><&$a&></p><p><&$a|e&></p>");
}
