//! Command handlers for the `esc` CLI.
//!
//! Each handler returns the process exit status instead of exiting, so the
//! binary stays a thin dispatcher. Shared helpers (`read_file`,
//! `load_config`) live here in the module root.

use std::path::Path;

use esc_lexer_core::MAX_SOURCE_LEN;
use esc_policy::EscapeConfig;

mod check;
mod debug;
mod explain;
mod options;
mod repair;

pub use check::check_files;
pub use debug::{dump_segments, dump_tokens};
pub use explain::explain_code;
pub use options::{Options, OutputFormat};
pub use repair::repair_file;

/// No violations, nothing failed.
pub const EXIT_OK: i32 = 0;
/// At least one violation was reported.
pub const EXIT_VIOLATIONS: i32 = 1;
/// Bad arguments, an unreadable file or an invalid configuration.
pub const EXIT_ERROR: i32 = 2;

/// Read a source file, turning I/O failures and files too large to scan
/// into a user-facing message.
pub(crate) fn read_file(path: &Path) -> Result<String, String> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        let path = path.display();
        match e.kind() {
            std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
            std::io::ErrorKind::PermissionDenied => {
                format!("permission denied reading '{path}'")
            }
            std::io::ErrorKind::InvalidData => {
                format!("'{path}' contains invalid UTF-8 data")
            }
            _ => format!("error reading '{path}': {e}"),
        }
    })?;
    check_size(path, content.len())?;
    Ok(content)
}

/// Offsets are 32-bit, so longer files cannot be scanned.
fn check_size(path: &Path, len: usize) -> Result<(), String> {
    if len > MAX_SOURCE_LEN {
        return Err(format!(
            "'{}' is {len} bytes, over the {MAX_SOURCE_LEN}-byte limit",
            path.display()
        ));
    }
    Ok(())
}

/// The configuration named by `--config`, or the built-in defaults.
pub(crate) fn load_config(path: Option<&Path>) -> Result<EscapeConfig, String> {
    match path {
        Some(path) => EscapeConfig::load(path).map_err(|e| e.to_string()),
        None => Ok(EscapeConfig::default()),
    }
}
