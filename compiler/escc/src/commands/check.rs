//! The `check` command: report escape violations in template files.

use std::io::IsTerminal;
use std::path::Path;

use esc_diagnostic::emitter::{ColorMode, DiagnosticEmitter, JsonEmitter, TerminalEmitter};
use esc_policy::{parse, EscapeConfig, Report};
use rayon::prelude::*;

use super::{load_config, read_file, Options, OutputFormat};
use super::{EXIT_ERROR, EXIT_OK, EXIT_VIOLATIONS};

/// One checked file: its text and report, or why it could not be read.
struct FileOutcome {
    path: String,
    result: Result<(String, Report), String>,
}

/// Check every file in `options.files` and print diagnostics to stdout.
///
/// Files are scanned in parallel; output keeps the argument order.
pub fn check_files(options: &Options) -> i32 {
    let config = match load_config(options.config.as_deref()) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("error: {msg}");
            return EXIT_ERROR;
        }
    };

    let outcomes: Vec<FileOutcome> = options
        .files
        .par_iter()
        .map(|path| check_one(path, &config))
        .collect();

    match options.format {
        OutputFormat::Terminal => {
            let is_tty = std::io::stdout().is_terminal();
            let emitter =
                TerminalEmitter::with_color_mode(std::io::stdout(), ColorMode::Auto, is_tty);
            report_all(emitter, &outcomes)
        }
        OutputFormat::Json => report_all(JsonEmitter::new(std::io::stdout()), &outcomes),
    }
}

fn check_one(path: &Path, config: &EscapeConfig) -> FileOutcome {
    let display = path.display().to_string();
    let result = read_file(path).map(|content| {
        let report = parse(&content, config, false);
        let shown = &display;
        tracing::debug!(
            path = %shown,
            document = %report.document.kind,
            violations = report.violations.len(),
            "checked file"
        );
        (content, report)
    });
    FileOutcome {
        path: display,
        result,
    }
}

fn report_all(mut emitter: impl DiagnosticEmitter, outcomes: &[FileOutcome]) -> i32 {
    let mut violations = 0;
    let mut failed = false;
    for outcome in outcomes {
        match &outcome.result {
            Ok((source, report)) => {
                emitter.begin_file(&outcome.path, source);
                let diagnostics = report.diagnostics();
                violations += diagnostics.len();
                emitter.emit_all(&diagnostics);
            }
            Err(msg) => {
                eprintln!("error: {msg}");
                failed = true;
            }
        }
    }
    emitter.emit_summary(violations);
    emitter.flush();

    if failed {
        EXIT_ERROR
    } else if violations > 0 {
        EXIT_VIOLATIONS
    } else {
        EXIT_OK
    }
}
