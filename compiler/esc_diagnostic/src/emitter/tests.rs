use super::*;

#[test]
fn file_context_lines() {
    let ctx = FileContext::new("a.tpl", "<p>\r\n<&$a&>\n</p>");
    assert_eq!(ctx.line_col(5), (2, 1));
    assert_eq!(ctx.line_text(2), "<&$a&>");
    assert_eq!(ctx.line_text(1), "<p>");
    assert_eq!(ctx.line_text(9), "");
}
