//! The `repair` command: apply every escape fix to one file.

use std::path::Path;

use esc_policy::parse;

use super::{load_config, read_file, Options, EXIT_ERROR, EXIT_OK};

/// Repair `path`, printing the result or, with `--write`, rewriting the
/// file in place.
pub fn repair_file(path: &Path, options: &Options) -> i32 {
    let config = match load_config(options.config.as_deref()) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("error: {msg}");
            return EXIT_ERROR;
        }
    };
    let content = match read_file(path) {
        Ok(content) => content,
        Err(msg) => {
            eprintln!("error: {msg}");
            return EXIT_ERROR;
        }
    };

    if !config.auto_fix {
        eprintln!("warning: auto-fix is disabled by `isXssAutoFixed`; leaving the file unchanged");
    }
    let report = parse(&content, &config, config.auto_fix);
    for error in &report.rejected_edits {
        eprintln!("warning: {error}");
    }

    if !options.write {
        print!("{}", report.content);
        return EXIT_OK;
    }
    if report.content == content {
        println!("Unchanged: {}", path.display());
        return EXIT_OK;
    }
    if let Err(e) = std::fs::write(path, &report.content) {
        eprintln!("error: cannot write '{}': {e}", path.display());
        return EXIT_ERROR;
    }
    println!(
        "Repaired: {} ({} violation(s))",
        path.display(),
        report.violations.len()
    );
    EXIT_OK
}
