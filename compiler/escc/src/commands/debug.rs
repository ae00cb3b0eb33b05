//! Debug commands: `tokens` and `segment` for inspecting the scanners.

use std::path::Path;

use esc_lexer_core::tokenize;
use esc_markup::segment;

use super::{load_config, read_file, Options, EXIT_ERROR, EXIT_OK};

/// Tokenize a file as script and print the token stream.
pub fn dump_tokens(path: &Path, options: &Options) -> i32 {
    let (content, delimiters) = match load(path, options) {
        Ok(loaded) => loaded,
        Err(msg) => {
            eprintln!("error: {msg}");
            return EXIT_ERROR;
        }
    };

    let tokens = tokenize(&content, &delimiters);
    println!("Tokens for '{}' ({} tokens):", path.display(), tokens.len());
    for tok in &tokens {
        println!(
            "  {} @ {}..{} {:?}",
            tok.kind.name(),
            tok.start,
            tok.end(),
            tok.text(&content)
        );
    }
    EXIT_OK
}

/// Segment a file into markup runs and print them.
pub fn dump_segments(path: &Path, options: &Options) -> i32 {
    let (content, delimiters) = match load(path, options) {
        Ok(loaded) => loaded,
        Err(msg) => {
            eprintln!("error: {msg}");
            return EXIT_ERROR;
        }
    };

    let runs = segment(&content, &delimiters);
    println!("Runs for '{}' ({} runs):", path.display(), runs.len());
    for run in &runs {
        println!("  {} @ {:?} {:?}", run.kind, run.span, run.text(&content));
    }
    EXIT_OK
}

fn load(path: &Path, options: &Options) -> Result<(String, esc_lexer_core::Delimiters), String> {
    let config = load_config(options.config.as_deref())?;
    let content = read_file(path)?;
    Ok((content, config.delimiters))
}
