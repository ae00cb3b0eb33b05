//! `esc`: template escape checker.

use escc::commands::{
    check_files, dump_segments, dump_tokens, explain_code, repair_file, Options, EXIT_ERROR,
};

fn main() {
    escc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];
    let options = match Options::parse(&args[2..]) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(EXIT_ERROR);
        }
    };

    let code = match command.as_str() {
        "check" => {
            if options.files.is_empty() {
                eprintln!("Usage: esc check [--config <file>] [--format terminal|json] <files...>");
                std::process::exit(EXIT_ERROR);
            }
            check_files(&options)
        }
        "repair" => {
            let [path] = options.files.as_slice() else {
                eprintln!("Usage: esc repair [--config <file>] [--write] <file>");
                std::process::exit(EXIT_ERROR);
            };
            repair_file(path, &options)
        }
        "tokens" => {
            let [path] = options.files.as_slice() else {
                eprintln!("Usage: esc tokens [--config <file>] <file>");
                std::process::exit(EXIT_ERROR);
            };
            dump_tokens(path, &options)
        }
        "segment" => {
            let [path] = options.files.as_slice() else {
                eprintln!("Usage: esc segment [--config <file>] <file>");
                std::process::exit(EXIT_ERROR);
            };
            dump_segments(path, &options)
        }
        "explain" | "--explain" => {
            let Some(code) = args.get(2) else {
                eprintln!("Usage: esc explain <CODE>");
                eprintln!("Example: esc explain X0001");
                std::process::exit(EXIT_ERROR);
            };
            explain_code(code)
        }
        "help" | "--help" | "-h" => {
            print_usage();
            0
        }
        "version" | "--version" | "-V" => {
            println!("esc {}", env!("CARGO_PKG_VERSION"));
            0
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            EXIT_ERROR
        }
    };
    std::process::exit(code);
}

fn print_usage() {
    println!("esc: check and repair escape modifiers in <& $var &> templates");
    println!();
    println!("Usage: esc <command> [options]");
    println!();
    println!("Commands:");
    println!("  check <files...>     Report missing and conflicting escape modifiers");
    println!("  repair <file>        Print the file with every violation fixed");
    println!("  tokens <file>        Tokenize as script and display tokens");
    println!("  segment <file>       Split into markup runs and display them");
    println!("  explain <code>       Describe a diagnostic code (e.g., X0001)");
    println!("  help                 Show this help message");
    println!();
    println!("Options:");
    println!("  -c, --config <file>  JSON escape configuration");
    println!("  --format <fmt>       check output: terminal (default) or json");
    println!("  -w, --write          repair: rewrite the file in place");
    println!();
    println!("Set RUST_LOG=esc_policy=debug to trace the engine.");
}
