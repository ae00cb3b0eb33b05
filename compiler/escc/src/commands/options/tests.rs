use pretty_assertions::assert_eq;

use super::*;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_owned()).collect()
}

#[test]
fn files_and_flags_in_any_order() {
    let Ok(options) = Options::parse(&args(&["a.tpl", "--config", "esc.json", "b.tpl", "--write"]))
    else {
        panic!("valid arguments");
    };
    assert_eq!(
        options,
        Options {
            config: Some(PathBuf::from("esc.json")),
            format: OutputFormat::Terminal,
            write: true,
            files: vec![PathBuf::from("a.tpl"), PathBuf::from("b.tpl")],
        }
    );
}

#[test]
fn inline_flag_values() {
    let Ok(options) = Options::parse(&args(&["--format=json", "--config=x.json", "a.tpl"])) else {
        panic!("valid arguments");
    };
    assert_eq!(options.format, OutputFormat::Json);
    assert_eq!(options.config, Some(PathBuf::from("x.json")));
}

#[test]
fn missing_flag_value() {
    assert_eq!(
        Options::parse(&args(&["a.tpl", "--config"])),
        Err("missing value for --config".to_owned())
    );
}

#[test]
fn unknown_format_and_flag() {
    assert_eq!(
        Options::parse(&args(&["--format", "xml"])),
        Err("unknown format 'xml' (expected terminal or json)".to_owned())
    );
    assert_eq!(
        Options::parse(&args(&["--fix"])),
        Err("unknown option '--fix'".to_owned())
    );
}

#[test]
fn lone_dash_is_a_file() {
    let Ok(options) = Options::parse(&args(&["-"])) else {
        panic!("valid arguments");
    };
    assert_eq!(options.files, vec![PathBuf::from("-")]);
}
