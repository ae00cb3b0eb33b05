//! Flag parsing shared by every command.

use std::path::PathBuf;

/// How `check` reports diagnostics.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "terminal" => Some(OutputFormat::Terminal),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Parsed command-line options, everything after the command name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub config: Option<PathBuf>,
    pub format: OutputFormat,
    /// Rewrite files in place instead of printing.
    pub write: bool,
    pub files: Vec<PathBuf>,
}

impl Options {
    /// Accepts `--config <file>`, `--format <fmt>` (either also in
    /// `--flag=value` form), `--write`, and any number of file paths.
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut options = Options::default();
        let mut args = args.iter();
        while let Some(arg) = args.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => (flag, Some(value.to_owned())),
                _ => (arg.as_str(), None),
            };
            match flag {
                "--config" | "-c" => {
                    let value = inline
                        .or_else(|| args.next().cloned())
                        .ok_or("missing value for --config")?;
                    options.config = Some(PathBuf::from(value));
                }
                "--format" => {
                    let value = inline
                        .or_else(|| args.next().cloned())
                        .ok_or("missing value for --format")?;
                    options.format = OutputFormat::parse(&value)
                        .ok_or_else(|| format!("unknown format '{value}' (expected terminal or json)"))?;
                }
                "--write" | "-w" => options.write = true,
                _ if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(format!("unknown option '{arg}'"));
                }
                _ => options.files.push(PathBuf::from(arg)),
            }
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests;
