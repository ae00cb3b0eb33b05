use super::*;

#[test]
fn text_edit_delete() {
    let edit = TextEdit::delete(Span::new(10, 17));

    assert_eq!(edit.span, Span::new(10, 17));
    assert!(edit.new_text.is_empty());
}

#[test]
fn text_edit_replace() {
    let edit = TextEdit::replace(Span::new(2, 9), "$x|e_data");

    assert_eq!(edit.span, Span::new(2, 9));
    assert_eq!(edit.new_text, "$x|e_data");
}

#[test]
fn shifted_moves_span_only() {
    let edit = TextEdit::replace(Span::new(2, 4), "ab").shifted(100);
    assert_eq!(edit.span, Span::new(102, 104));
    assert_eq!(edit.new_text, "ab");
}
