//! The `explain` command: describe a diagnostic code.

use esc_diagnostic::ErrorCode;

use super::{EXIT_ERROR, EXIT_OK};

pub fn explain_code(code: &str) -> i32 {
    let Some(code) = ErrorCode::ALL
        .iter()
        .find(|c| c.as_str().eq_ignore_ascii_case(code))
    else {
        eprintln!("Unknown error code: {code}");
        eprintln!();
        eprintln!("Known codes:");
        for c in ErrorCode::ALL {
            eprintln!("  {c}  {}", c.description());
        }
        return EXIT_ERROR;
    };
    println!("{code}: {}", code.description());
    EXIT_OK
}
